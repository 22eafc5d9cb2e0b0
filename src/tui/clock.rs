use chrono::Local;

/// Header date/time display, refreshed by the event loop between input
/// events. Lives and dies with the terminal session.
#[derive(Debug, Clone)]
pub struct Clock {
    pub date: String,
    pub time: String,
}

impl Clock {
    pub fn new() -> Self {
        let mut clock = Self { date: String::new(), time: String::new() };
        clock.tick();
        clock
    }

    /// Re-reads the wall clock. One-second display resolution; callers may
    /// tick as often as they like.
    pub fn tick(&mut self) {
        let now = Local::now();
        self.date = now.format("%Y-%m-%d").to_string();
        self.time = now.format("%H:%M:%S").to_string();
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_iso_date_and_time() {
        let clock = Clock::new();
        let display = clock.display();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(display.len(), 19);
        assert_eq!(&display[4..5], "-");
        assert_eq!(&display[13..14], ":");
    }
}
