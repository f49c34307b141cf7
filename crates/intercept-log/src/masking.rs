//! Character-range masking for sensitive string values.
//!
//! A [`MaskRule`] is declared on a parameter or field that holds string data and
//! replaces a contiguous run of characters with [`MASK_CHAR`] before the value
//! reaches a log entry. Rules are validated when they are declared, so masking
//! itself is total and never fails.
//!
//! ```rust,ignore
//! use intercept_log::MaskRule;
//!
//! let rule = MaskRule::new(0, 12)?;
//! assert_eq!(rule.apply("4111111111111111"), "************1111");
//! ```

use crate::constants::MASK_CHAR;
use crate::error::{ConfigError, ConfigResult};

/// Declared instruction to mask `length` characters starting at `start`.
///
/// Offsets count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskRule {
    start: usize,
    length: usize,
}

impl MaskRule {
    /// Declares a mask rule.
    ///
    /// Fails with [`ConfigError::NegativeMaskStart`] when `start < 0` and with
    /// [`ConfigError::NonPositiveMaskLength`] when `length <= 0`.
    pub fn new(start: i64, length: i64) -> ConfigResult<Self> {
        let start = usize::try_from(start).map_err(|_| ConfigError::NegativeMaskStart(start))?;
        let length = match usize::try_from(length) {
            Ok(length) if length > 0 => length,
            _ => return Err(ConfigError::NonPositiveMaskLength(length)),
        };
        Ok(Self { start, length })
    }

    /// Index of the first masked character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of masked characters.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Masks `text` according to this rule.
    pub fn apply(&self, text: &str) -> String {
        mask_range(text, self.start, Some(self.length))
    }
}

/// Replaces the characters in `[start, start + length)` with `*`.
///
/// - Empty or blank input is returned unchanged.
/// - A negative `start` is clamped to 0.
/// - A `start` at or beyond the end of the input leaves it unchanged.
/// - A negative `length`, or one running past the end, masks to the end.
///
/// The output always has the same number of characters as the input.
pub fn mask(text: &str, start: i64, length: i64) -> String {
    let start = usize::try_from(start).unwrap_or(0);
    let length = usize::try_from(length).ok();
    mask_range(text, start, length)
}

fn mask_range(text: &str, start: usize, length: Option<usize>) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let char_count = text.chars().count();
    if start >= char_count {
        return text.to_string();
    }

    let end = match length {
        Some(length) if start.saturating_add(length) <= char_count => start + length,
        _ => char_count,
    };

    text.chars()
        .enumerate()
        .map(|(i, c)| if (start..end).contains(&i) { MASK_CHAR } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_prefix() {
        assert_eq!(mask("1234567890", 0, 4), "****567890");
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask("4111111111111111", 0, 12), "************1111");
    }

    #[test]
    fn test_mask_whole_string() {
        assert_eq!(mask("secret", 0, 6), "******");
    }

    #[test]
    fn test_mask_empty_and_blank_unchanged() {
        assert_eq!(mask("", 3, 2), "");
        assert_eq!(mask("   ", 0, 2), "   ");
    }

    #[test]
    fn test_mask_negative_start_clamped() {
        assert_eq!(mask("abcdef", -3, 2), "**cdef");
    }

    #[test]
    fn test_mask_start_beyond_end_unchanged() {
        assert_eq!(mask("abc", 3, 2), "abc");
        assert_eq!(mask("abc", 10, 1), "abc");
    }

    #[test]
    fn test_mask_length_overflow_clamped() {
        assert_eq!(mask("abcdef", 4, 100), "abcd**");
        assert_eq!(mask("abcdef", 2, -1), "ab****");
        assert_eq!(mask("abcdef", 2, i64::MAX), "ab****");
    }

    #[test]
    fn test_mask_counts_characters_not_bytes() {
        assert_eq!(mask("şifre123", 0, 5), "*****123");
    }

    #[test]
    fn test_mask_rule_validation() {
        assert!(matches!(
            MaskRule::new(-1, 4),
            Err(ConfigError::NegativeMaskStart(-1))
        ));
        assert!(matches!(
            MaskRule::new(0, 0),
            Err(ConfigError::NonPositiveMaskLength(0))
        ));
        assert!(matches!(
            MaskRule::new(0, -5),
            Err(ConfigError::NonPositiveMaskLength(-5))
        ));

        let rule = MaskRule::new(2, 3).unwrap();
        assert_eq!(rule.start(), 2);
        assert_eq!(rule.length(), 3);
        assert_eq!(rule.apply("abcdefg"), "ab***fg");
    }
}
