//! Formatting of fleeting notes.

use chrono::NaiveTime;

/// Decorative prefix placed before every fleeting note.
pub const FLEETING_MARKER: &str = "⚡";

/// 12-hour clock with lowercase meridiem, e.g. `03:04:05 pm`.
pub const TIMESTAMP_FORMAT: &str = "%I:%M:%S %P";

/// Render a fleeting note as a markdown list item:
/// `- ⚡ *03:04:05 pm:* **Fleeting**:: <text>`.
///
/// Whitespace runs in `text`, line breaks included, collapse to a single
/// space. Returns `None` when the text is blank.
#[must_use]
pub fn fleeting_line(text: &str, at: NaiveTime) -> Option<String> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return None;
    }

    Some(format!(
        "- {FLEETING_MARKER} *{}:* **Fleeting**:: {text}",
        at.format(TIMESTAMP_FORMAT)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn formats_afternoon() {
        assert_eq!(
            fleeting_line("call back Sam", t(15, 4, 5)).unwrap(),
            "- ⚡ *03:04:05 pm:* **Fleeting**:: call back Sam"
        );
    }

    #[test]
    fn formats_morning() {
        let line = fleeting_line("idea", t(9, 30, 0)).unwrap();
        assert!(line.contains("*09:30:00 am:*"), "{line}");
    }

    #[test]
    fn folds_line_breaks() {
        let line = fleeting_line("first\nsecond\r\nthird", t(12, 0, 0)).unwrap();
        assert!(line.ends_with(":: first second third"), "{line}");
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(fleeting_line("   \n", t(12, 0, 0)), None);
    }
}
