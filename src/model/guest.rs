use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A guest's contact information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentificationKind {
    Passport,
    DriverLicense,
    IdCard,
    Other,
}

impl IdentificationKind {
    pub fn label(self) -> &'static str {
        match self {
            IdentificationKind::Passport => "PASSPORT",
            IdentificationKind::DriverLicense => "DRIVER LICENSE",
            IdentificationKind::IdCard => "ID CARD",
            IdentificationKind::Other => "OTHER",
        }
    }
}

/// A guest's identification document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identification {
    pub kind: IdentificationKind,
    pub number: String,
    pub issuing_country: String,
    pub expiration_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
}

/// Adults/children split for a booking party.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PartySize {
    pub adults: u32,
    pub children: u32,
}

impl Default for PartySize {
    fn default() -> Self {
        Self { adults: 1, children: 0 }
    }
}

/// A booking associated with a guest. Read-only to the report core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub check_in_date: NaiveDate,
    pub number_of_nights: u32,
    pub number_of_guests: PartySize,
    pub status: BookingStatus,
    pub date_made: NaiveDate,
}

impl Booking {
    /// New booking checked in on the given date.
    pub fn new(check_in_date: NaiveDate, number_of_nights: u32, number_of_guests: PartySize) -> Self {
        Self {
            booking_id: new_booking_id(),
            check_in_date,
            number_of_nights,
            number_of_guests,
            status: BookingStatus::Confirmed,
            date_made: check_in_date,
        }
    }
}

/// Booking references use a short human-readable tag rather than a UUID so
/// they fit on the report grid and the printed form.
fn new_booking_id() -> String {
    let n: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    format!("BK-{}", n)
}

/// The main guest record held by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub guest_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub contact: ContactInfo,
    pub identification: Option<Identification>,
    pub bookings: Vec<Booking>,
}

impl Guest {
    pub fn new(first_name: String, last_name: String) -> Self {
        Self {
            guest_id: Uuid::new_v4(),
            first_name,
            last_name,
            nationality: String::new(),
            contact: ContactInfo::default(),
            identification: None,
            bookings: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// The booking the current stay refers to. A guest record only ever
    /// carries one active booking in this system.
    pub fn current_booking(&self) -> Option<&Booking> {
        self.bookings.first()
    }
}
