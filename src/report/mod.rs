pub mod derive;
pub mod editor;
pub mod form;
pub mod stay;

pub use derive::derive_rows;
pub use editor::{EditorEvent, EditorReaction, Mode, ReportEditor, RowHost};
pub use form::{render_form, FormOptions};
pub use stay::{checkout_date, format_period};
