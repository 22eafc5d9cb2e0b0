//! Terminal lifecycle and screen dispatch.
//!
//! One event loop owns the terminal: it polls for input with a short
//! timeout, refreshes the clock between events, and routes keys and mouse
//! clicks to whichever screen is active. Every state change happens
//! synchronously inside one event dispatch.

pub mod clock;
pub mod screens;
pub mod theme;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::registry::Registry;
use clock::Clock;
use screens::check_in::CheckInScreen;
use screens::check_out::CheckOutScreen;
use screens::main_menu::MainMenuScreen;
use screens::tm30_report::Tm30ReportScreen;
use screens::view_guests::ViewGuestsScreen;
use screens::{Outcome, ScreenId};
use theme::Theme;

enum ActiveScreen {
    MainMenu(MainMenuScreen),
    CheckIn(CheckInScreen),
    CheckOut(CheckOutScreen),
    ViewGuests(ViewGuestsScreen),
    Tm30Report(Tm30ReportScreen),
}

struct Tui {
    registry: Registry,
    config: Config,
    theme: Theme,
    clock: Clock,
    active: ActiveScreen,
}

impl Tui {
    fn new(registry: Registry, config: Config) -> Self {
        Self {
            registry,
            config,
            theme: Theme::new(),
            clock: Clock::new(),
            active: ActiveScreen::MainMenu(MainMenuScreen::new(None)),
        }
    }

    fn navigate(&mut self, target: ScreenId, status: Option<String>) -> Result<()> {
        self.active = match target {
            ScreenId::MainMenu => ActiveScreen::MainMenu(MainMenuScreen::new(status)),
            ScreenId::CheckIn => ActiveScreen::CheckIn(CheckInScreen::new()),
            ScreenId::CheckOut => ActiveScreen::CheckOut(CheckOutScreen::new()),
            ScreenId::ViewGuests => ActiveScreen::ViewGuests(ViewGuestsScreen::new()),
            ScreenId::Tm30Report => {
                ActiveScreen::Tm30Report(Tm30ReportScreen::enter(&mut self.registry)?)
            }
        };
        Ok(())
    }

    /// Applies a screen outcome. Returns false when the session is over.
    fn apply(&mut self, outcome: Outcome) -> Result<bool> {
        match outcome {
            Outcome::Stay => Ok(true),
            Outcome::Navigate(target) => {
                self.navigate(target, None)?;
                Ok(true)
            }
            Outcome::NavigateWithStatus(target, status) => {
                self.navigate(target, Some(status))?;
                Ok(true)
            }
            Outcome::Quit => Ok(false),
        }
    }

    fn handle_event(&mut self, ev: Event) -> Result<bool> {
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Global escape hatch, whatever the screen state.
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(false);
                }
                let outcome = match &mut self.active {
                    ActiveScreen::MainMenu(screen) => screen.handle_key(key),
                    ActiveScreen::CheckIn(screen) => screen.handle_key(key, &mut self.registry)?,
                    ActiveScreen::CheckOut(screen) => screen.handle_key(key, &mut self.registry)?,
                    ActiveScreen::ViewGuests(screen) => screen.handle_key(key),
                    ActiveScreen::Tm30Report(screen) => {
                        screen.handle_key(key, &mut self.registry, &self.config)?
                    }
                };
                self.apply(outcome)
            }
            Event::Mouse(mouse) => {
                let outcome = match &mut self.active {
                    ActiveScreen::Tm30Report(screen) => {
                        screen.handle_mouse(mouse, &mut self.registry, &self.config)?
                    }
                    _ => Outcome::Stay,
                };
                self.apply(outcome)
            }
            _ => Ok(true),
        }
    }

    fn render(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        match &mut self.active {
            ActiveScreen::MainMenu(screen) => {
                screen.render(f, area, &self.theme, &self.clock, &self.registry)
            }
            ActiveScreen::CheckIn(screen) => screen.render(f, area, &self.theme, &self.clock),
            ActiveScreen::CheckOut(screen) => {
                screen.render(f, area, &self.theme, &self.clock, &self.registry)
            }
            ActiveScreen::ViewGuests(screen) => {
                screen.render(f, area, &self.theme, &self.clock, &self.registry)
            }
            ActiveScreen::Tm30Report(screen) => {
                screen.render(f, area, &self.theme, &self.clock, &self.registry)
            }
        }
    }
}

/// Runs the terminal UI until the operator quits.
pub async fn run(registry: Registry, config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut tui = Tui::new(registry, config);
    let result = run_loop(&mut terminal, &mut tui).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, tui: &mut Tui) -> Result<()> {
    info!("Entering TUI loop");
    loop {
        tui.clock.tick();
        terminal.draw(|f| tui.render(f))?;

        // The poll timeout doubles as the clock tick; the display only has
        // one-second resolution, so a 250ms cadence is plenty.
        if event::poll(Duration::from_millis(250))? {
            let ev = event::read()?;
            if !tui.handle_event(ev)? {
                break;
            }
        }
    }
    info!("Leaving TUI loop");
    Ok(())
}
