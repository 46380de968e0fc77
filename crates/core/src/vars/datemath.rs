//! Date tokens for note paths.
//!
//! Supports expressions like:
//! - `{{today}}`, `{{date}}`, `{{week}}`, `{{year}}`
//! - `{{today - 1d}}`, `{{today + 1w}}`, `{{today - 1M}}`
//! - `{{today | %Y/%m/%d}}` (with format specifier)
//! - `{{week}}` returns the ISO week number, `{{week | %G-W%V}}` for "2025-W51"

use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Duration, Months, NaiveDate};
use regex::{Captures, Regex};
use thiserror::Error;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid regex"));

static EXPR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*(?:([+-])\s*(\d+)([dwMyY]))?$").expect("valid regex")
});

/// Error type for date token parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateMathError {
    #[error("invalid date expression: {0}")]
    InvalidExpression(String),

    #[error("unknown date token: {0}")]
    UnknownBase(String),

    #[error("invalid date format: {0}")]
    InvalidFormat(String),

    #[error("invalid number in expression: {0}")]
    InvalidNumber(String),

    #[error("date offset out of range: {0}")]
    OutOfRange(String),
}

/// The value a token starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBase {
    /// Current date (YYYY-MM-DD)
    Today,
    /// Alias for today
    Date,
    /// ISO week number
    Week,
    /// Four-digit year
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Days,
    Weeks,
    Months,
    Years,
}

/// A fully parsed date token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateExpr {
    pub base: DateBase,
    /// Signed offset; `None` when the token has no `+`/`-` part
    pub offset: Option<(i64, DurationUnit)>,
    pub format: Option<String>,
}

/// Parse the inside of a `{{...}}` token.
///
/// Examples:
/// - `today` -> DateExpr { base: Today, offset: None, format: None }
/// - `today - 1d` -> DateExpr { base: Today, offset: Some((-1, Days)), format: None }
/// - `today | %d.%m.%Y` -> DateExpr { base: Today, offset: None, format: Some("%d.%m.%Y") }
///
/// # Errors
/// Unknown bases, malformed offsets and invalid strftime formats.
pub fn parse_date_expr(input: &str) -> Result<DateExpr, DateMathError> {
    let input = input.trim();

    let (expr_part, format) = match input.split_once('|') {
        Some((e, f)) => (e.trim(), Some(f.trim().to_string())),
        None => (input, None),
    };

    if let Some(fmt) = &format {
        if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
            return Err(DateMathError::InvalidFormat(fmt.clone()));
        }
    }

    let caps = EXPR_RE
        .captures(expr_part)
        .ok_or_else(|| DateMathError::InvalidExpression(input.to_string()))?;

    let base = parse_base(&caps[1])?;

    let offset = match (caps.get(2), caps.get(3), caps.get(4)) {
        (Some(op), Some(amount), Some(unit)) => {
            let amount: i64 = amount
                .as_str()
                .parse()
                .map_err(|_| DateMathError::InvalidNumber(amount.as_str().to_string()))?;
            let signed = if op.as_str() == "-" { -amount } else { amount };
            let unit = match unit.as_str() {
                "d" => DurationUnit::Days,
                "w" => DurationUnit::Weeks,
                "M" => DurationUnit::Months,
                _ => DurationUnit::Years,
            };
            Some((signed, unit))
        }
        _ => None,
    };

    Ok(DateExpr { base, offset, format })
}

fn parse_base(s: &str) -> Result<DateBase, DateMathError> {
    match s.to_lowercase().as_str() {
        "today" => Ok(DateBase::Today),
        "date" => Ok(DateBase::Date),
        "week" => Ok(DateBase::Week),
        "year" => Ok(DateBase::Year),
        _ => Err(DateMathError::UnknownBase(s.to_string())),
    }
}

/// Evaluate a parsed token against `today`.
///
/// # Errors
/// `OutOfRange` when the offset moves the date outside what `NaiveDate` holds.
pub fn evaluate_date_expr(expr: &DateExpr, today: NaiveDate) -> Result<String, DateMathError> {
    let date = match expr.offset {
        None => today,
        Some((amount, unit)) => apply_offset(today, amount, unit)?,
    };

    let rendered = match (expr.base, expr.format.as_deref()) {
        (_, Some(fmt)) => date.format(fmt).to_string(),
        (DateBase::Today | DateBase::Date, None) => date.format("%Y-%m-%d").to_string(),
        (DateBase::Week, None) => date.iso_week().week().to_string(),
        (DateBase::Year, None) => date.year().to_string(),
    };
    Ok(rendered)
}

/// Replace every `{{...}}` token in `template`. Any token that does not parse
/// is an error; nothing is left half-rendered.
///
/// # Errors
/// The first token that fails to parse or evaluate.
pub fn render_date_tokens(template: &str, today: NaiveDate) -> Result<String, DateMathError> {
    let mut first_error = None;

    let rendered = TOKEN_RE.replace_all(template, |caps: &Captures<'_>| {
        match parse_date_expr(&caps[1]).and_then(|expr| evaluate_date_expr(&expr, today)) {
            Ok(value) => value,
            Err(e) => {
                first_error.get_or_insert(e);
                String::new()
            }
        }
    });

    match first_error {
        Some(e) => Err(e),
        None => Ok(rendered.into_owned()),
    }
}

/// Check whether a string contains date tokens.
#[must_use]
pub fn has_date_tokens(s: &str) -> bool {
    TOKEN_RE.is_match(s)
}

fn apply_offset(
    date: NaiveDate,
    amount: i64,
    unit: DurationUnit,
) -> Result<NaiveDate, DateMathError> {
    let shifted = match unit {
        DurationUnit::Days => Duration::try_days(amount).and_then(|d| date.checked_add_signed(d)),
        DurationUnit::Weeks => Duration::try_weeks(amount).and_then(|d| date.checked_add_signed(d)),
        DurationUnit::Months => add_months(date, amount),
        DurationUnit::Years => amount.checked_mul(12).and_then(|m| add_months(date, m)),
    };

    shifted.ok_or_else(|| DateMathError::OutOfRange(format!("{date} {amount:+} {unit:?}")))
}

/// Month arithmetic clamped to the last valid day (Jan 31 + 1M = Feb 28/29).
fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let span = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(span)
    } else {
        date.checked_sub_months(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_plain_base() {
        let expr = parse_date_expr("today").unwrap();
        assert_eq!(expr.base, DateBase::Today);
        assert_eq!(expr.offset, None);
        assert_eq!(expr.format, None);
    }

    #[test]
    fn parse_offset_and_format() {
        let expr = parse_date_expr(" today - 2w | %d.%m ").unwrap();
        assert_eq!(expr.offset, Some((-2, DurationUnit::Weeks)));
        assert_eq!(expr.format.as_deref(), Some("%d.%m"));
    }

    #[test]
    fn parse_rejects_unknown_base() {
        assert_eq!(
            parse_date_expr("tomorrow"),
            Err(DateMathError::UnknownBase("tomorrow".into()))
        );
    }

    #[test]
    fn parse_rejects_bad_format() {
        assert_eq!(
            parse_date_expr("today | %Q"),
            Err(DateMathError::InvalidFormat("%Q".into()))
        );
    }

    #[test]
    fn evaluate_defaults() {
        let today = d(2025, 12, 17);
        let eval = |s: &str| evaluate_date_expr(&parse_date_expr(s).unwrap(), today).unwrap();
        assert_eq!(eval("today"), "2025-12-17");
        assert_eq!(eval("date - 1d"), "2025-12-16");
        assert_eq!(eval("week"), "51");
        assert_eq!(eval("year + 1y"), "2026");
    }

    #[test]
    fn month_offset_clamps_day() {
        assert_eq!(add_months(d(2024, 1, 31), 1), Some(d(2024, 2, 29)));
        assert_eq!(add_months(d(2025, 1, 15), -1), Some(d(2024, 12, 15)));
        assert_eq!(add_months(d(2025, 3, 31), -1), Some(d(2025, 2, 28)));
    }

    #[test]
    fn huge_offsets_are_errors() {
        let today = d(2025, 3, 9);
        for template in [
            "{{today + 99999999d}}.md",
            "{{today - 99999999w}}.md",
            "{{today + 9999999999M}}.md",
            "{{year + 999999999999999999y}}",
        ] {
            let err = render_date_tokens(template, today).unwrap_err();
            assert!(matches!(err, DateMathError::OutOfRange(_)), "{template}: {err:?}");
        }
    }

    #[test]
    fn year_offset_crosses_leap_day() {
        let expr = parse_date_expr("today + 1y").unwrap();
        assert_eq!(evaluate_date_expr(&expr, d(2024, 2, 29)).unwrap(), "2025-02-28");
    }

    #[test]
    fn render_template() {
        let out = render_date_tokens("journal/{{year}}/{{today}}.md", d(2025, 3, 9)).unwrap();
        assert_eq!(out, "journal/2025/2025-03-09.md");
        assert!(has_date_tokens("{{today}}.md"));
        assert!(!has_date_tokens("daily.md"));
    }

    #[test]
    fn render_fails_on_bad_token() {
        let err = render_date_tokens("{{today}}-{{nope}}.md", d(2025, 3, 9)).unwrap_err();
        assert_eq!(err, DateMathError::UnknownBase("nope".into()));
    }
}
