//! Masking strategies
//!
//! Generic masking replaces characters with `*`. The email and phone variants
//! keep just enough structure (domain, trailing digits) for the value to stay
//! recognizable, and leave values of the wrong shape untouched.

use super::Anonymizer;

const MASK_CHAR: char = '*';

/// Replace every character with `*`, except the last `keep_last` characters
/// when the value is longer than `keep_last`
///
/// Works on characters, not bytes, so multi-byte text masks to the same
/// visible width. Masking an already fully masked value is a no-op.
///
/// # Examples
///
/// ```
/// use privacy_checker::anonymization::anonymizer::mask_value;
///
/// assert_eq!(mask_value("secret", 0), "******");
/// assert_eq!(mask_value("1234567890", 4), "******7890");
/// assert_eq!(mask_value("abc", 5), "***");
/// assert_eq!(mask_value("", 2), "");
/// ```
pub fn mask_value(value: &str, keep_last: usize) -> String {
    let len = value.chars().count();
    if keep_last > 0 && len > keep_last {
        let masked = len - keep_last;
        value
            .chars()
            .enumerate()
            .map(|(i, c)| if i < masked { MASK_CHAR } else { c })
            .collect()
    } else {
        std::iter::repeat(MASK_CHAR).take(len).collect()
    }
}

/// Mask the local part of an email address
///
/// The value must contain exactly one `@`; anything else is returned
/// unchanged. With `keep_domain`, the first `keep_local_chars` local
/// characters are kept, the rest of the local part is masked (at least one
/// `*`). Without `keep_domain`, the whole local part is masked with at least
/// three `*`. The domain is kept verbatim in both cases.
///
/// # Examples
///
/// ```
/// use privacy_checker::anonymization::anonymizer::mask_email;
///
/// assert_eq!(mask_email("john.doe@example.com", true, 1), "j*******@example.com");
/// assert_eq!(mask_email("a@example.com", true, 1), "a*@example.com");
/// assert_eq!(mask_email("jo@mail.org", false, 1), "***@mail.org");
/// assert_eq!(mask_email("not-an-email", true, 1), "not-an-email");
/// ```
pub fn mask_email(value: &str, keep_domain: bool, keep_local_chars: usize) -> String {
    if value.matches('@').count() != 1 {
        return value.to_string();
    }
    let Some((local, domain)) = value.split_once('@') else {
        return value.to_string();
    };

    let local_len = local.chars().count();
    if keep_domain {
        let kept: String = local.chars().take(keep_local_chars).collect();
        let kept_len = kept.chars().count();
        let stars = (local_len - kept_len).max(1);
        format!("{kept}{}@{domain}", mask_run(stars))
    } else {
        format!("{}@{domain}", mask_run(local_len.max(3)))
    }
}

/// Mask the digits of a phone number, keeping the trailing `keep_last`
///
/// Only digits survive; punctuation and spaces from the original layout are
/// dropped. A leading `+` is preserved. Values without any digit are returned
/// unchanged, and numbers with at most `keep_last` digits are fully masked.
///
/// # Examples
///
/// ```
/// use privacy_checker::anonymization::anonymizer::mask_phone;
///
/// assert_eq!(mask_phone("+251 911-234-567", 3), "+*********567");
/// assert_eq!(mask_phone("(555) 123-4567", 4), "******4567");
/// assert_eq!(mask_phone("12", 3), "**");
/// assert_eq!(mask_phone("n/a", 3), "n/a");
/// ```
pub fn mask_phone(value: &str, keep_last: usize) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return value.to_string();
    }

    let total = digits.len();
    let masked: String = if total <= keep_last {
        mask_run(total)
    } else {
        let hidden = total - keep_last;
        let mut out = mask_run(hidden);
        out.extend(&digits[hidden..]);
        out
    };

    if value.trim_start().starts_with('+') {
        format!("+{masked}")
    } else {
        masked
    }
}

fn mask_run(len: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(len).collect()
}

/// Generic masking strategy
pub struct MaskStrategy {
    keep_last: usize,
}

impl MaskStrategy {
    /// Create a masking strategy keeping the last `keep_last` characters
    pub fn new(keep_last: usize) -> Self {
        Self { keep_last }
    }
}

impl Anonymizer for MaskStrategy {
    fn anonymize_value(&mut self, value: &str) -> String {
        mask_value(value, self.keep_last)
    }
}

/// Email-aware masking strategy
pub struct EmailMaskStrategy {
    keep_domain: bool,
    keep_local_chars: usize,
}

impl EmailMaskStrategy {
    /// Create an email masking strategy
    pub fn new(keep_domain: bool, keep_local_chars: usize) -> Self {
        Self {
            keep_domain,
            keep_local_chars,
        }
    }
}

impl Anonymizer for EmailMaskStrategy {
    fn anonymize_value(&mut self, value: &str) -> String {
        mask_email(value, self.keep_domain, self.keep_local_chars)
    }
}

/// Phone-aware masking strategy
pub struct PhoneMaskStrategy {
    keep_last: usize,
}

impl PhoneMaskStrategy {
    /// Create a phone masking strategy keeping the last `keep_last` digits
    pub fn new(keep_last: usize) -> Self {
        Self { keep_last }
    }
}

impl Anonymizer for PhoneMaskStrategy {
    fn anonymize_value(&mut self, value: &str) -> String {
        mask_phone(value, self.keep_last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hello", 0, "*****")]
    #[test_case("hello", 2, "***lo")]
    #[test_case("hi", 2, "**")]
    #[test_case("hi", 5, "**")]
    #[test_case("", 0, "")]
    #[test_case("héllo wörld", 3, "********rld")]
    fn test_mask_value(input: &str, keep_last: usize, expected: &str) {
        assert_eq!(mask_value(input, keep_last), expected);
    }

    #[test]
    fn test_mask_value_is_idempotent() {
        let once = mask_value("Jane Smith", 0);
        assert_eq!(mask_value(&once, 0), once);
        assert!(once.chars().all(|c| c == '*'));
    }

    #[test]
    fn test_mask_value_differs_for_non_empty_input() {
        for input in ["a", "ab", "John Doe", "0911234567"] {
            assert_ne!(mask_value(input, 0), input);
        }
    }

    #[test_case("test@example.com", 1, "t***@example.com")]
    #[test_case("test@example.com", 0, "****@example.com")]
    #[test_case("ab@example.com", 5, "ab*@example.com")]
    #[test_case("@example.com", 1, "*@example.com")]
    fn test_mask_email_keep_domain(input: &str, keep: usize, expected: &str) {
        assert_eq!(mask_email(input, true, keep), expected);
    }

    #[test]
    fn test_mask_email_hides_whole_local_part() {
        assert_eq!(mask_email("test@example.com", false, 1), "****@example.com");
        assert_eq!(mask_email("a@b.io", false, 1), "***@b.io");
        assert_eq!(mask_email("jo@mail.org", false, 1), "***@mail.org");
    }

    #[test_case("plain text")]
    #[test_case("a@b@c.com")]
    #[test_case("")]
    fn test_mask_email_passes_through_wrong_shape(input: &str) {
        assert_eq!(mask_email(input, true, 1), input);
    }

    #[test_case("1234567890", 3, "*******890")]
    #[test_case("+251911234567", 3, "+*********567")]
    #[test_case("  +1 (555) 010-9999", 4, "+*******9999")]
    #[test_case("123", 3, "***")]
    #[test_case("+12", 3, "+**")]
    #[test_case("555-0199", 0, "*******")]
    fn test_mask_phone(input: &str, keep_last: usize, expected: &str) {
        assert_eq!(mask_phone(input, keep_last), expected);
    }

    #[test]
    fn test_mask_phone_without_digits_is_unchanged() {
        assert_eq!(mask_phone("unknown", 3), "unknown");
        assert_eq!(mask_phone("", 3), "");
    }

    #[test]
    fn test_strategies_delegate_to_primitives() {
        assert_eq!(MaskStrategy::new(0).anonymize_value("abc"), "***");
        assert_eq!(
            EmailMaskStrategy::new(true, 1).anonymize_value("bob@x.org"),
            "b**@x.org"
        );
        assert_eq!(PhoneMaskStrategy::new(2).anonymize_value("0911"), "**11");
    }
}
