//! Stay-period arithmetic for bookings.
//!
//! Pure date helpers shared by the booking screens and the printable form.

use chrono::{Days, NaiveDate};

/// Checkout date for a stay of `nights` nights, calendar-correct across
/// month and year boundaries.
pub fn checkout_date(check_in: NaiveDate, nights: u32) -> NaiveDate {
    check_in
        .checked_add_days(Days::new(u64::from(nights)))
        .unwrap_or(NaiveDate::MAX)
}

/// Human-readable stay period with fixed ISO (`YYYY-MM-DD`) endpoints.
pub fn format_period(check_in: NaiveDate, nights: u32) -> String {
    let check_out = checkout_date(check_in, nights);
    format!("{} - {}", check_in.format("%Y-%m-%d"), check_out.format("%Y-%m-%d"))
}
