use crate::error::InputError;
use std::time::Duration;

/// Parse a count-down length typed by the user ("25", "0.5", " 90 ").
/// The target is truncated to whole seconds.
pub fn parse_minutes(input: &str) -> Result<Duration, InputError> {
    let trimmed = input.trim();
    let minutes: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    if !minutes.is_finite() {
        return Err(InputError::NotANumber(trimmed.to_string()));
    }
    if minutes <= 0.0 {
        return Err(InputError::NotPositive(trimmed.to_string()));
    }

    let secs = (minutes * 60.0).floor() as u64;
    if secs == 0 {
        return Err(InputError::TooShort);
    }
    Ok(Duration::from_secs(secs))
}

/// Parse the size of a trend window in days, `1..=max`
pub fn parse_days(input: &str, max: u32) -> Result<u32, InputError> {
    let trimmed = input.trim();
    let days: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    if days < 1 || days > i64::from(max) {
        return Err(InputError::DaysOutOfRange {
            value: trimmed.to_string(),
            max,
        });
    }
    Ok(days as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("25"), Ok(Duration::from_secs(1500)));
        assert_eq!(parse_minutes(" 0.5 "), Ok(Duration::from_secs(30)));
        assert_eq!(parse_minutes("1.999"), Ok(Duration::from_secs(119)));
    }

    #[test]
    fn test_parse_minutes_rejects_invalid() {
        assert_eq!(parse_minutes("abc"), Err(InputError::NotANumber("abc".into())));
        assert_eq!(parse_minutes(""), Err(InputError::NotANumber("".into())));
        assert_eq!(parse_minutes("inf"), Err(InputError::NotANumber("inf".into())));
        assert_eq!(parse_minutes("0"), Err(InputError::NotPositive("0".into())));
        assert_eq!(parse_minutes("-5"), Err(InputError::NotPositive("-5".into())));
        assert_eq!(parse_minutes("0.001"), Err(InputError::TooShort));
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("7", 365), Ok(7));
        assert_eq!(parse_days("365", 365), Ok(365));
        assert!(matches!(parse_days("0", 365), Err(InputError::DaysOutOfRange { .. })));
        assert!(matches!(parse_days("366", 365), Err(InputError::DaysOutOfRange { .. })));
        assert_eq!(parse_days("seven", 365), Err(InputError::NotANumber("seven".into())));
    }
}
