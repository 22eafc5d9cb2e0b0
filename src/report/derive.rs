//! Flattening of checked-in guests into reportable-person rows.

use crate::model::guest::Guest;
use crate::model::report::{
    ReportRow, RELATIONSHIP_ACCOMPANYING, RELATIONSHIP_CHILD, RELATIONSHIP_PRIMARY,
};

/// Derives the initial report grid from the guest registry.
///
/// One PRIMARY row per guest with both names on file, then one
/// ACCOMPANYING row per additional adult and one CHILD row per child, all
/// tagged with the guest's booking reference. Guests missing a first or
/// last name contribute nothing. Callers must not re-derive into a
/// populated row list: doing so would overwrite in-flight edits.
pub fn derive_rows(guests: &[Guest]) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    for guest in guests {
        if guest.first_name.is_empty() || guest.last_name.is_empty() {
            continue;
        }

        let booking_id = guest
            .current_booking()
            .map(|b| b.booking_id.clone())
            .unwrap_or_default();

        rows.push(ReportRow {
            booking_id: booking_id.clone(),
            name_and_surname: guest.full_name(),
            nationality: guest.nationality.clone(),
            passport_number: guest
                .identification
                .as_ref()
                .map(|id| id.number.clone())
                .unwrap_or_default(),
            relationship: RELATIONSHIP_PRIMARY.to_string(),
            ..Default::default()
        });

        let Some(party) = guest.current_booking().map(|b| b.number_of_guests) else {
            continue;
        };

        // The primary guest counts as the first adult.
        for n in 1..party.adults.max(1) {
            rows.push(placeholder_row(
                &booking_id,
                format!("ADULT {}", n),
                RELATIONSHIP_ACCOMPANYING,
            ));
        }
        for n in 1..=party.children {
            rows.push(placeholder_row(
                &booking_id,
                format!("CHILD {}", n),
                RELATIONSHIP_CHILD,
            ));
        }
    }

    rows
}

fn placeholder_row(booking_id: &str, name: String, relationship: &str) -> ReportRow {
    ReportRow {
        booking_id: booking_id.to_string(),
        name_and_surname: name,
        relationship: relationship.to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::guest::{Booking, PartySize};
    use chrono::NaiveDate;

    fn guest_with_party(adults: u32, children: u32) -> Guest {
        let mut guest = Guest::new("Maya".into(), "Okafor".into());
        guest.nationality = "NIGERIAN".into();
        let check_in = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        guest.bookings.push(Booking::new(check_in, 2, PartySize { adults, children }));
        guest
    }

    #[test]
    fn test_party_of_three_adults_two_children() {
        let rows = derive_rows(&[guest_with_party(3, 2)]);
        assert_eq!(rows.len(), 5);
        let relationships: Vec<&str> = rows.iter().map(|r| r.relationship.as_str()).collect();
        assert_eq!(
            relationships,
            ["PRIMARY", "ACCOMPANYING", "ACCOMPANYING", "CHILD", "CHILD"]
        );
        assert_eq!(rows[1].name_and_surname, "ADULT 1");
        assert_eq!(rows[2].name_and_surname, "ADULT 2");
        assert_eq!(rows[3].name_and_surname, "CHILD 1");
        assert_eq!(rows[4].name_and_surname, "CHILD 2");
        // Every row carries the originating booking.
        assert!(rows.iter().all(|r| r.booking_id == rows[0].booking_id));
    }

    #[test]
    fn test_solo_guest_gets_single_row() {
        let rows = derive_rows(&[guest_with_party(1, 0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name_and_surname, "Maya Okafor");
        assert_eq!(rows[0].nationality, "NIGERIAN");
        assert_eq!(rows[0].relationship, "PRIMARY");
    }

    #[test]
    fn test_guest_without_name_is_skipped() {
        let mut nameless = guest_with_party(2, 1);
        nameless.last_name.clear();
        let rows = derive_rows(&[nameless, guest_with_party(1, 0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name_and_surname, "Maya Okafor");
    }

    #[test]
    fn test_guest_without_booking_still_reports_primary() {
        let mut guest = Guest::new("Jon".into(), "Snow".into());
        guest.nationality = "BRITISH".into();
        let rows = derive_rows(&[guest]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].booking_id, "");
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let guests = [guest_with_party(2, 1)];
        assert_eq!(derive_rows(&guests), derive_rows(&guests));
    }
}
