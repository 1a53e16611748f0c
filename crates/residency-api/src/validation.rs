//! Field rules for the settings forms and the resident id path segment.
//!
//! Lengths count UTF-16 code units, the way a browser form's `maxlength`
//! and `value.length` do. Arabic letters count once; characters outside the
//! Basic Multilingual Plane count twice.

use once_cell::sync::Lazy;
use regex::Regex;
use residency_types::ObjectId;

use crate::error::DashboardError;
use crate::strings;

pub const FULLNAME_MIN: usize = 6;
pub const PASSWORD_MIN: usize = 6;

/// Gmail and Yahoo addresses only.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+([-+.][A-Za-z0-9_]+)*@(yahoo|gmail)\.com$").expect("valid regex")
});

fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

pub fn fullname(name: &str) -> Result<(), DashboardError> {
    if text_len(name) < FULLNAME_MIN {
        return Err(DashboardError::Invalid(strings::FULLNAME_TOO_SHORT));
    }
    Ok(())
}

pub fn email(address: &str) -> Result<(), DashboardError> {
    if !EMAIL_RE.is_match(address) {
        return Err(DashboardError::Invalid(strings::EMAIL_PROVIDER));
    }
    Ok(())
}

/// The confirmation is compared by length only. Two different passwords of
/// the same length pass.
pub fn new_password(password: &str, confirm: &str) -> Result<(), DashboardError> {
    let len = text_len(password);
    if len < PASSWORD_MIN {
        return Err(DashboardError::Invalid(strings::PASSWORD_TOO_SHORT));
    }
    if len != text_len(confirm) {
        return Err(DashboardError::Invalid(strings::PASSWORDS_MISMATCH));
    }
    Ok(())
}

pub fn resident_id(raw: &str) -> Result<ObjectId, DashboardError> {
    ObjectId::parse(raw).ok_or(DashboardError::Invalid(strings::INVALID_RESIDENT_ID))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), DashboardError>) -> &'static str {
        result.unwrap_err().user_message()
    }

    #[test]
    fn fullname_needs_six_characters() {
        assert!(fullname("Salem A").is_ok());
        assert!(fullname("Salem!").is_ok());
        assert_eq!(message(fullname("Salem")), strings::FULLNAME_TOO_SHORT);
        assert_eq!(message(fullname("")), strings::FULLNAME_TOO_SHORT);
        // Six Arabic letters are twelve bytes but six characters
        assert!(fullname("محمدعل").is_ok());
        assert!(fullname("محمد").is_err());
    }

    #[test]
    fn supplementary_characters_count_twice() {
        // U+1D49C is one character but two UTF-16 units
        assert!(fullname("𝒜bcde").is_ok());
        assert!(fullname("𝒜bcd").is_err());
        assert!(new_password("𝒜bcde", "123456").is_ok());
        assert_eq!(message(new_password("𝒜bcde", "12345")), strings::PASSWORDS_MISMATCH);
    }

    #[test]
    fn email_accepts_gmail_and_yahoo() {
        assert!(email("salem@gmail.com").is_ok());
        assert!(email("salem.ali@yahoo.com").is_ok());
        assert!(email("salem-ali+work@gmail.com").is_ok());
        assert!(email("salem_99@gmail.com").is_ok());
    }

    #[test]
    fn email_rejects_other_shapes() {
        for bad in [
            "salem@hotmail.com",
            "salem@gmail.org",
            "salem@gmail.com.evil",
            "@gmail.com",
            "salem..ali@gmail.com",
            ".salem@gmail.com",
            "salem@GMAIL.com",
            "سالم@gmail.com",
            "",
        ] {
            assert_eq!(message(email(bad)), strings::EMAIL_PROVIDER, "{bad}");
        }
    }

    #[test]
    fn password_length_rules() {
        assert_eq!(message(new_password("12345", "12345")), strings::PASSWORD_TOO_SHORT);
        assert_eq!(message(new_password("123456", "1234567")), strings::PASSWORDS_MISMATCH);
        assert!(new_password("123456", "123456").is_ok());
    }

    #[test]
    fn password_confirmation_compares_length_only() {
        assert!(new_password("abcdef", "uvwxyz").is_ok());
    }

    #[test]
    fn resident_id_must_be_24_hex() {
        assert!(resident_id("5f1a2b3c4d5e6f7a8b9c0d1e").is_ok());
        assert!(resident_id("5F1A2B3C4D5E6F7A8B9C0D1E").is_ok());
        let err = resident_id("not-24-hex").unwrap_err();
        assert_eq!(err.user_message(), strings::INVALID_RESIDENT_ID);
    }
}
