use chrono::NaiveTime;
use unicode_width::UnicodeWidthStr;

/// Format seconds as zero-padded "HH:MM:SS"; negatives clamp to zero.
pub fn format_hms(secs: i64) -> String {
    let secs = secs.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Coarse "<H> saat <M> dakika" phrase
pub fn format_phrase(minutes: u32) -> String {
    format!("{} saat {} dakika", minutes / 60, minutes % 60)
}

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Left-align to `width` terminal columns.
pub fn pad_display(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_is_zero_padded() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(6600), "01:50:00");
        assert_eq!(format_hms(31_199), "08:39:59");
        assert_eq!(format_hms(-3), "00:00:00");
    }

    #[test]
    fn phrase_splits_hours_and_minutes() {
        assert_eq!(format_phrase(110), "1 saat 50 dakika");
        assert_eq!(format_phrase(520), "8 saat 40 dakika");
        assert_eq!(format_phrase(7), "0 saat 7 dakika");
    }

    #[test]
    fn pads_turkish_names_by_columns() {
        assert_eq!(pad_display("Öğle", 6), "Öğle  ");
        assert_eq!(pad_display("İkindi", 3), "İkindi");
    }
}
