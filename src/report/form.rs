//! Printable TM30 form rendering.
//!
//! Produces a standalone, offline HTML document matching the bilingual
//! government form layout. Deterministic: same rows and bookings in, same
//! bytes out.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::model::guest::Booking;
use crate::model::report::ReportRow;
use crate::report::stay::format_period;

/// Blank rows are appended up to this count when padding is enabled, so a
/// short report still prints as a full page of ruled lines.
pub const MIN_FORM_ROWS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct FormOptions {
    /// Pad the table with empty rows up to [`MIN_FORM_ROWS`].
    pub pad_to_min_rows: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self { pad_to_min_rows: true }
    }
}

/// Bilingual column headers, in print order. The arrival-card number is
/// never collected and its cells stay blank; the stay period is computed
/// from the row's booking.
const COLUMNS: [(&str, &str); 11] = [
    ("ลำดับ", "NO."),
    ("ชื่อคนต่างด้าว", "Name and Surname"),
    ("สัญชาติ", "Nationality"),
    ("หนังสือเดินทางเลขที่", "Passport Number"),
    ("ประเภทวีซ่า", "Type of Visa"),
    ("วันเดินทางเข้า", "Date of Arrival"),
    ("ครบกำหนดอนุญาต", "Expiry Date of Stay"),
    ("ช่องทางเข้า", "Point of Entry"),
    ("บัตรขาเข้าเลขที่", "Arrival Card T.M.No."),
    ("พักอาศัยระหว่าง วันที่...", "Period of stay From....to....."),
    ("ความเกี่ยวพัน", "Relationship"),
];

/// Minimal HTML escaping for user-entered cell content.
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the finalized rows into the printable form. `bookings` maps
/// booking references to their bookings so the stay period column can be
/// computed; rows with an unknown booking get a blank period.
pub fn render_form(
    rows: &[ReportRow],
    bookings: &HashMap<String, Booking>,
    options: FormOptions,
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(concat!(
        "<!DOCTYPE html>\n",
        "<html lang=\"th\">\n",
        "<head>\n",
        "<meta charset=\"utf-8\">\n",
        "<title>TM30</title>\n",
        "<style>\n",
        "body { font-family: sans-serif; font-size: 11px; margin: 24px; }\n",
        ".form-header { text-align: center; margin-bottom: 16px; }\n",
        ".form-header h1 { font-size: 16px; margin: 0; }\n",
        ".form-header h2 { font-size: 14px; margin: 2px 0; }\n",
        ".form-header h3 { font-size: 11px; font-weight: normal; margin: 0; }\n",
        "table { width: 100%; border-collapse: collapse; }\n",
        "th, td { border: 1px solid #000; padding: 4px; text-align: center; }\n",
        "td { height: 22px; }\n",
        ".signature { margin-top: 48px; text-align: right; }\n",
        ".signature div { margin-top: 8px; }\n",
        "@media print { body { margin: 0; } }\n",
        "</style>\n",
        "</head>\n",
        "<body>\n",
    ));

    html.push_str("<div class=\"form-header\">\n");
    html.push_str("<h1>บัญชีรายชื่อคนต่างด้าวที่พักอาศัย</h1>\n");
    html.push_str("<h2>NAME OF ALIENS IN RESIDENCE</h2>\n");
    html.push_str("<h3>(IN BLOCK LETTERS)</h3>\n");
    html.push_str("</div>\n");

    html.push_str("<table>\n<thead>\n<tr>\n");
    for (thai, english) in COLUMNS {
        let _ = writeln!(html, "<th>{}<br>{}</th>", thai, english);
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for (index, row) in rows.iter().enumerate() {
        let period = bookings
            .get(&row.booking_id)
            .map(|b| format_period(b.check_in_date, b.number_of_nights))
            .unwrap_or_default();
        write_row(
            &mut html,
            index + 1,
            [
                &esc(&row.name_and_surname),
                &esc(&row.nationality),
                &esc(&row.passport_number),
                &esc(&row.type_of_visa),
                &esc(&row.date_of_arrival_in_thailand),
                &esc(&row.expiry_date_of_stay),
                &esc(&row.point_of_entry),
                "",
                &esc(&period),
                &esc(&row.relationship),
            ],
        );
    }

    if options.pad_to_min_rows {
        for index in rows.len()..MIN_FORM_ROWS {
            write_row(&mut html, index + 1, [""; 10]);
        }
    }

    html.push_str("</tbody>\n</table>\n");
    html.push_str("<div class=\"signature\">\n");
    html.push_str("<div>ลายมือชื่อ................................................ผู้รับรองรายการ</div>\n");
    html.push_str("<div>(................................................)</div>\n");
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn write_row(html: &mut String, number: usize, cells: [&str; 10]) {
    let _ = write!(html, "<tr>\n<td>{}</td>\n", number);
    for cell in cells {
        let _ = writeln!(html, "<td>{}</td>", cell);
    }
    html.push_str("</tr>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::guest::PartySize;
    use chrono::NaiveDate;

    fn sample_row(name: &str) -> ReportRow {
        ReportRow {
            booking_id: "BK-123456".into(),
            name_and_surname: name.into(),
            nationality: "FRENCH".into(),
            passport_number: "X1234567".into(),
            type_of_visa: "TOURIST".into(),
            date_of_arrival_in_thailand: "2024-01-28".into(),
            expiry_date_of_stay: "2024-02-27".into(),
            point_of_entry: "BKK".into(),
            relationship: "PRIMARY".into(),
        }
    }

    fn sample_bookings() -> HashMap<String, Booking> {
        let mut booking = Booking::new(
            NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
            3,
            PartySize::default(),
        );
        booking.booking_id = "BK-123456".into();
        HashMap::from([(booking.booking_id.clone(), booking)])
    }

    #[test]
    fn test_form_contains_data_and_computed_period() {
        let html = render_form(&[sample_row("JEAN DUPONT")], &sample_bookings(), FormOptions::default());
        assert!(html.contains("JEAN DUPONT"));
        assert!(html.contains("2024-01-30 - 2024-02-02"));
        assert!(html.contains("NAME OF ALIENS IN RESIDENCE"));
        assert!(html.contains("บัญชีรายชื่อคนต่างด้าวที่พักอาศัย"));
    }

    #[test]
    fn test_all_eleven_columns_render() {
        let html = render_form(&[], &HashMap::new(), FormOptions::default());
        assert_eq!(html.matches("<th>").count(), 11);
        assert!(html.contains("Arrival Card T.M.No."));
    }

    #[test]
    fn test_padding_fills_to_ten_rows() {
        let html = render_form(&[sample_row("A")], &sample_bookings(), FormOptions::default());
        assert_eq!(html.matches("<tr>").count(), 1 + MIN_FORM_ROWS);
        // Row numbering continues through the blanks.
        assert!(html.contains("<td>10</td>"));
    }

    #[test]
    fn test_padding_can_be_disabled() {
        let rows = [sample_row("A"), sample_row("B")];
        let html = render_form(&rows, &sample_bookings(), FormOptions { pad_to_min_rows: false });
        assert_eq!(html.matches("<tr>").count(), 1 + rows.len());
    }

    #[test]
    fn test_unknown_booking_leaves_period_blank() {
        let html = render_form(&[sample_row("A")], &HashMap::new(), FormOptions { pad_to_min_rows: false });
        assert!(!html.contains(" - 2024"));
    }

    #[test]
    fn test_cell_content_is_escaped() {
        let mut row = sample_row("<b>&bad</b>");
        row.point_of_entry = "\"BKK\"".into();
        let html = render_form(&[row], &sample_bookings(), FormOptions { pad_to_min_rows: false });
        assert!(html.contains("&lt;b&gt;&amp;bad&lt;/b&gt;"));
        assert!(html.contains("&quot;BKK&quot;"));
        assert!(!html.contains("<b>&bad</b>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let rows = [sample_row("A")];
        let bookings = sample_bookings();
        let first = render_form(&rows, &bookings, FormOptions::default());
        let second = render_form(&rows, &bookings, FormOptions::default());
        assert_eq!(first, second);
    }
}
