//! Bounded numeric input and the speech rate modifier.

use std::fmt;

/// Lowest accepted speech rate, in percent.
pub const MIN_RATE: i64 = -100;
/// Highest accepted speech rate, in percent.
pub const MAX_RATE: i64 = 100;

/// Result of parsing a bounded integer answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedInput {
    /// The accepted value, or the default.
    pub value: i64,
    /// True when the input was present but unusable and the default was taken.
    pub fell_back: bool,
}

/// Parses `input` as an integer within `[min, max]`.
///
/// Blank input quietly yields `default`. Input that is not an integer, or
/// that lies outside the inclusive bounds, yields `default` with
/// `fell_back` set so the caller can warn.
///
/// ## Examples
///
/// ```
/// use edge_speak_lib::rate::parse_bounded;
///
/// assert_eq!(parse_bounded(" 25 ", 0, -100, 100).value, 25);
/// assert!(parse_bounded("fast", 0, -100, 100).fell_back);
/// assert!(!parse_bounded("", 0, -100, 100).fell_back);
/// ```
pub fn parse_bounded(input: &str, default: i64, min: i64, max: i64) -> BoundedInput {
    let input = input.trim();
    if input.is_empty() {
        return BoundedInput {
            value: default,
            fell_back: false,
        };
    }

    match input.parse::<i64>() {
        Ok(value) if (min..=max).contains(&value) => BoundedInput {
            value,
            fell_back: false,
        },
        _ => BoundedInput {
            value: default,
            fell_back: true,
        },
    }
}

/// Formats `value` with an explicit sign, followed by `suffix`.
///
/// ## Examples
///
/// ```
/// use edge_speak_lib::rate::format_signed;
///
/// assert_eq!(format_signed(0, "%"), "+0%");
/// assert_eq!(format_signed(-35, "%"), "-35%");
/// assert_eq!(format_signed(7, ""), "+7");
/// ```
pub fn format_signed(value: i64, suffix: &str) -> String {
    format!("{value:+}{suffix}")
}

/// Speech tempo adjustment in percent, always within `[-100, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeechRate(i64);

impl SpeechRate {
    /// Creates a rate, clamping to the accepted range.
    pub fn new(percent: i64) -> Self {
        Self(percent.clamp(MIN_RATE, MAX_RATE))
    }

    /// The percentage value.
    pub fn percent(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SpeechRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_signed(self.0, "%"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_string(input: &str) -> String {
        SpeechRate::new(parse_bounded(input, 0, MIN_RATE, MAX_RATE).value).to_string()
    }

    #[test]
    fn test_in_range_values_keep_their_sign() {
        for value in [-100, -99, -1, 0, 1, 42, 100] {
            assert_eq!(rate_string(&value.to_string()), format!("{value:+}%"));
        }
    }

    #[test]
    fn test_explicit_plus_sign_is_accepted() {
        assert_eq!(rate_string("+15"), "+15%");
    }

    #[test]
    fn test_out_of_range_falls_back_with_warning() {
        for input in ["101", "-101", "1000", "99999999999999999999"] {
            let parsed = parse_bounded(input, 0, MIN_RATE, MAX_RATE);
            assert!(parsed.fell_back, "input {input:?}");
            assert_eq!(rate_string(input), "+0%");
        }
    }

    #[test]
    fn test_non_numeric_falls_back_with_warning() {
        for input in ["fast", "1.5", "--5", "10%"] {
            let parsed = parse_bounded(input, 0, MIN_RATE, MAX_RATE);
            assert!(parsed.fell_back, "input {input:?}");
            assert_eq!(parsed.value, 0);
        }
    }

    #[test]
    fn test_blank_input_is_default_without_warning() {
        for input in ["", "   ", "\t"] {
            let parsed = parse_bounded(input, 0, MIN_RATE, MAX_RATE);
            assert!(!parsed.fell_back);
            assert_eq!(rate_string(input), "+0%");
        }
    }

    #[test]
    fn test_speech_rate_clamps() {
        assert_eq!(SpeechRate::new(250).percent(), 100);
        assert_eq!(SpeechRate::new(-250).percent(), -100);
        assert_eq!(SpeechRate::default().to_string(), "+0%");
    }
}
