use chrono::NaiveDateTime;

/// Wire format of `createdAt` timestamps
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// How timestamps are shown in lists
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%b %d, %H:%M";

pub const NO_DESCRIPTION: &str = "No description";

/// Amounts are always shown with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Reformat a wire timestamp for display, or return it untouched.
///
/// Parsing is a prefix match: fractional seconds or a zone suffix after the
/// seconds are ignored.
pub fn format_created_at(raw: &str) -> String {
    match NaiveDateTime::parse_and_remainder(raw, WIRE_TIMESTAMP_FORMAT) {
        Ok((parsed, _rest)) => parsed.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn description_or_placeholder(description: Option<&str>) -> &str {
    match description {
        Some(text) if !text.is_empty() => text,
        _ => NO_DESCRIPTION,
    }
}
