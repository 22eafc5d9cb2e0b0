pub mod guests;
pub mod report;
pub mod tui;

pub use guests::guests_command;
pub use report::report_command;
pub use tui::tui_command;
