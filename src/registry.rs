//! The authoritative guest and report-row state.
//!
//! Screens never hold copies of this data; they read and mutate it here,
//! and every mutation is written through to the key-value store. Date
//! fields round-trip through their serialized textual form and are
//! re-parsed on load; records that fail to parse degrade to an empty
//! state with a logged warning.

use anyhow::Result;
use log::{info, warn};
use std::collections::HashMap;

use crate::model::guest::{Booking, BookingStatus, Guest};
use crate::model::report::{Field, ReportRow};
use crate::report::derive::derive_rows;
use crate::report::editor::RowHost;
use crate::store::KvStore;

const KEY_GUESTS: &str = "guests";
const KEY_REPORT_ROWS: &str = "tm30.rows";

pub struct Registry {
    store: KvStore,
    guests: Vec<Guest>,
    report_rows: Vec<ReportRow>,
}

impl Registry {
    pub fn load(store: KvStore) -> Self {
        let guests = read_key(&store, KEY_GUESTS);
        let report_rows = read_key(&store, KEY_REPORT_ROWS);
        Self { store, guests, report_rows }
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// The guest the check-out and detail screens operate on. The system
    /// hosts one party at a time, so this is the head of the list.
    pub fn current_guest(&self) -> Option<&Guest> {
        self.guests.first()
    }

    pub fn check_in(&mut self, guest: Guest) -> Result<()> {
        info!(
            "Checking in {} ({})",
            guest.full_name(),
            guest.current_booking().map(|b| b.booking_id.as_str()).unwrap_or("no booking")
        );
        self.guests.push(guest);
        self.save_guests()
    }

    /// Marks the current guest's booking checked out and removes the guest.
    /// In-flight report rows belong to the departing party and are reset
    /// with it.
    pub fn check_out(&mut self) -> Result<Option<Guest>> {
        if self.guests.is_empty() {
            return Ok(None);
        }
        let mut guest = self.guests.remove(0);
        if let Some(booking) = guest.bookings.first_mut() {
            booking.status = BookingStatus::CheckedOut;
        }
        info!("Checked out {}", guest.full_name());
        self.save_guests()?;
        self.clear_report_rows()?;
        Ok(Some(guest))
    }

    pub fn report_rows(&self) -> &[ReportRow] {
        &self.report_rows
    }

    /// Derives the report grid from the guest list, only when no rows exist
    /// yet. Re-deriving into a populated grid would overwrite in-flight
    /// edits, so a populated grid is left untouched.
    pub fn ensure_report_rows(&mut self) -> Result<()> {
        if !self.report_rows.is_empty() {
            return Ok(());
        }
        self.report_rows = derive_rows(&self.guests);
        if !self.report_rows.is_empty() {
            self.save_report_rows()?;
        }
        Ok(())
    }

    pub fn set_report_field(&mut self, row: usize, field: Field, value: String) -> Result<()> {
        let Some(report_row) = self.report_rows.get_mut(row) else {
            return Ok(());
        };
        report_row.set_value(field, value);
        self.save_report_rows()
    }

    /// Destroys the report grid (after submission, or when the party
    /// leaves).
    pub fn clear_report_rows(&mut self) -> Result<()> {
        if self.report_rows.is_empty() {
            return Ok(());
        }
        self.report_rows.clear();
        self.store.remove(KEY_REPORT_ROWS)
    }

    /// Wipes all persisted state.
    pub fn clear_all(&mut self) -> Result<()> {
        self.guests.clear();
        self.report_rows.clear();
        self.store.clear()
    }

    /// Booking lookup for stay-period computation on the printable form.
    pub fn bookings_by_id(&self) -> HashMap<String, Booking> {
        self.guests
            .iter()
            .flat_map(|g| g.bookings.iter())
            .map(|b| (b.booking_id.clone(), b.clone()))
            .collect()
    }

    fn save_guests(&mut self) -> Result<()> {
        let serialized = serde_json::to_string(&self.guests)?;
        self.store.set(KEY_GUESTS, serialized)
    }

    fn save_report_rows(&mut self) -> Result<()> {
        let serialized = serde_json::to_string(&self.report_rows)?;
        self.store.set(KEY_REPORT_ROWS, serialized)
    }
}

fn read_key<T: serde::de::DeserializeOwned + Default>(store: &KvStore, key: &str) -> T {
    match store.get(key) {
        None => T::default(),
        Some(value) => match serde_json::from_str(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Discarding unparsable record under {:?}: {}", key, e);
                T::default()
            }
        },
    }
}

/// The editor reads and writes the grid through this view; it never holds
/// its own copy of the rows.
impl RowHost for Registry {
    fn row_count(&self) -> usize {
        self.report_rows.len()
    }

    fn field_value(&self, row: usize, field: Field) -> String {
        self.report_rows
            .get(row)
            .map(|r| r.value(field).to_string())
            .unwrap_or_default()
    }

    fn commit(&mut self, row: usize, field: Field, value: String) {
        if let Err(e) = self.set_report_field(row, field, value) {
            warn!("Failed to persist report row {}: {}", row, e);
        }
    }
}
