use serde::{Deserialize, Serialize};

/// Relationship tags seeded by the row deriver. The field itself stays free
/// text on the grid.
pub const RELATIONSHIP_PRIMARY: &str = "PRIMARY";
pub const RELATIONSHIP_ACCOMPANYING: &str = "ACCOMPANYING";
pub const RELATIONSHIP_CHILD: &str = "CHILD";

/// One column of the report grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BookingId,
    NameAndSurname,
    Nationality,
    PassportNumber,
    TypeOfVisa,
    DateOfArrivalInThailand,
    ExpiryDateOfStay,
    PointOfEntry,
    Relationship,
}

/// The one and only field order. Both grid rendering and Tab traversal
/// consume this constant; nothing else may re-state the order.
pub const FIELD_ORDER: [Field; 9] = [
    Field::BookingId,
    Field::NameAndSurname,
    Field::Nationality,
    Field::PassportNumber,
    Field::TypeOfVisa,
    Field::DateOfArrivalInThailand,
    Field::ExpiryDateOfStay,
    Field::PointOfEntry,
    Field::Relationship,
];

impl Field {
    /// `BookingId` is displayed and selectable but never opens for editing.
    pub fn is_editable(self) -> bool {
        self != Field::BookingId
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::BookingId => "BOOKING",
            Field::NameAndSurname => "NAME & SURNAME",
            Field::Nationality => "NATIONALITY",
            Field::PassportNumber => "PASSPORT NO.",
            Field::TypeOfVisa => "VISA TYPE",
            Field::DateOfArrivalInThailand => "ARRIVAL DATE",
            Field::ExpiryDateOfStay => "EXPIRY DATE",
            Field::PointOfEntry => "ENTRY POINT",
            Field::Relationship => "RELATIONSHIP",
        }
    }

    fn position(self) -> usize {
        FIELD_ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn first_editable() -> Field {
        *FIELD_ORDER.iter().find(|f| f.is_editable()).expect("field order has editable fields")
    }

    pub fn last_editable() -> Field {
        *FIELD_ORDER.iter().rev().find(|f| f.is_editable()).expect("field order has editable fields")
    }

    /// Next editable field within the same row, if any.
    pub fn next_editable(self) -> Option<Field> {
        FIELD_ORDER[self.position() + 1..].iter().copied().find(|f| f.is_editable())
    }

    /// Previous editable field within the same row, if any.
    pub fn prev_editable(self) -> Option<Field> {
        FIELD_ORDER[..self.position()].iter().rev().copied().find(|f| f.is_editable())
    }
}

/// One reportable person on the TM30 grid. All fields except the booking
/// reference are independently editable free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub booking_id: String,
    pub name_and_surname: String,
    pub nationality: String,
    pub passport_number: String,
    pub type_of_visa: String,
    pub date_of_arrival_in_thailand: String,
    pub expiry_date_of_stay: String,
    pub point_of_entry: String,
    pub relationship: String,
}

impl ReportRow {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::BookingId => &self.booking_id,
            Field::NameAndSurname => &self.name_and_surname,
            Field::Nationality => &self.nationality,
            Field::PassportNumber => &self.passport_number,
            Field::TypeOfVisa => &self.type_of_visa,
            Field::DateOfArrivalInThailand => &self.date_of_arrival_in_thailand,
            Field::ExpiryDateOfStay => &self.expiry_date_of_stay,
            Field::PointOfEntry => &self.point_of_entry,
            Field::Relationship => &self.relationship,
        }
    }

    /// Writes an editable field. The booking reference is read-only once
    /// derived, so writes to it are dropped.
    pub fn set_value(&mut self, field: Field, value: String) {
        match field {
            Field::BookingId => {}
            Field::NameAndSurname => self.name_and_surname = value,
            Field::Nationality => self.nationality = value,
            Field::PassportNumber => self.passport_number = value,
            Field::TypeOfVisa => self.type_of_visa = value,
            Field::DateOfArrivalInThailand => self.date_of_arrival_in_thailand = value,
            Field::ExpiryDateOfStay => self.expiry_date_of_stay = value,
            Field::PointOfEntry => self.point_of_entry = value,
            Field::Relationship => self.relationship = value,
        }
    }

    /// True when every editable field holds non-whitespace content.
    pub fn is_complete(&self) -> bool {
        FIELD_ORDER
            .iter()
            .filter(|f| f.is_editable())
            .all(|f| !self.value(*f).trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_skips_booking_id() {
        assert_eq!(Field::first_editable(), Field::NameAndSurname);
        assert_eq!(Field::last_editable(), Field::Relationship);
        assert_eq!(Field::NameAndSurname.prev_editable(), None);
        assert_eq!(Field::Relationship.next_editable(), None);
        assert_eq!(Field::Nationality.prev_editable(), Some(Field::NameAndSurname));
    }

    #[test]
    fn test_booking_id_writes_are_dropped() {
        let mut row = ReportRow { booking_id: "BK-123456".into(), ..Default::default() };
        row.set_value(Field::BookingId, "BK-999999".into());
        assert_eq!(row.booking_id, "BK-123456");
    }

    #[test]
    fn test_completeness_trims_whitespace() {
        let mut row = ReportRow { booking_id: "BK-123456".into(), ..Default::default() };
        for field in FIELD_ORDER.iter().filter(|f| f.is_editable()) {
            row.set_value(*field, "x".into());
        }
        assert!(row.is_complete());
        row.set_value(Field::PointOfEntry, "   ".into());
        assert!(!row.is_complete());
    }
}
