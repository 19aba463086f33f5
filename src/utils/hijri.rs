use chrono::{Datelike, NaiveDate};

/// Turkish Hijri month names (index 0 = Muharrem)
const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharrem",
    "Safer",
    "Rebiülevvel",
    "Rebiülahir",
    "Cemaziyelevvel",
    "Cemaziyelahir",
    "Recep",
    "Şaban",
    "Ramazan",
    "Şevval",
    "Zilkade",
    "Zilhicce",
];

const PLACEHOLDER_YEAR: u32 = 1445;

/// Cosmetic Hijri-style label for a Gregorian date.
///
/// Not a calendar conversion: the day number is the Gregorian one, the month name
/// is picked by `gregorian_month % 12` and the year is fixed.
pub fn hijri_label(date: NaiveDate) -> String {
    let month_name = HIJRI_MONTH_NAMES[(date.month() % 12) as usize];
    format!("{} {} {}", date.day(), month_name, PLACEHOLDER_YEAR)
}
