pub mod guest;
pub mod report;

pub use guest::{Booking, BookingStatus, ContactInfo, Guest, Identification, IdentificationKind, PartySize};
pub use report::{Field, ReportRow, FIELD_ORDER};
