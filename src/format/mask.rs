//! Input masks for Brazilian tax ids (CPF) and phone numbers.
//!
//! Masks are re-applied to the whole field value after every keystroke, so
//! they must be idempotent: feeding a masked value back in yields the same
//! value.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of digits in a CPF.
pub const CPF_DIGITS: usize = 11;

/// Maximum number of digits in a phone number (two-digit area code + 9).
pub const PHONE_DIGITS: usize = 11;

static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("non-digit pattern should compile"));

static CPF_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{3})([0-9])").expect("cpf group pattern should compile"));

static CPF_CHECK_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{3})([0-9]{1,2})$").expect("cpf check digit pattern should compile")
});

static PHONE_AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2})([0-9])").expect("phone area pattern should compile"));

static PHONE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9])([0-9]{4})$").expect("phone suffix pattern should compile"));

/// Strips everything except ASCII digits.
///
/// ```
/// use patient_registry::format::digits_only;
///
/// assert_eq!(digits_only("123.456.789-01"), "12345678901");
/// ```
#[must_use]
pub fn digits_only(input: &str) -> String {
    NON_DIGIT.replace_all(input, "").into_owned()
}

fn capped_digits(input: &str, max: usize) -> String {
    digits_only(input).chars().take(max).collect()
}

/// Applies the CPF mask `000.000.000-00` to whatever digits are present.
///
/// Partial input is masked progressively: `"1234"` becomes `"123.4"`.
///
/// ```
/// use patient_registry::format::mask_cpf;
///
/// assert_eq!(mask_cpf("12345678901"), "123.456.789-01");
/// ```
#[must_use]
pub fn mask_cpf(input: &str) -> String {
    let digits = capped_digits(input, CPF_DIGITS);
    let value = CPF_GROUP.replace(&digits, "${1}.${2}");
    let value = CPF_GROUP.replace(&value, "${1}.${2}");
    CPF_CHECK_DIGITS.replace(&value, "${1}-${2}").into_owned()
}

/// Applies the phone mask `(00) 00000-0000` to whatever digits are present.
///
/// ```
/// use patient_registry::format::mask_phone;
///
/// assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
/// ```
#[must_use]
pub fn mask_phone(input: &str) -> String {
    let digits = capped_digits(input, PHONE_DIGITS);
    let value = PHONE_AREA.replace(&digits, "(${1}) ${2}");
    PHONE_SUFFIX.replace(&value, "${1}-${2}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_full() {
        assert_eq!(mask_cpf("12345678901"), "123.456.789-01");
    }

    #[test]
    fn test_cpf_progressive() {
        assert_eq!(mask_cpf("1"), "1");
        assert_eq!(mask_cpf("123"), "123");
        assert_eq!(mask_cpf("1234"), "123.4");
        assert_eq!(mask_cpf("1234567"), "123.456.7");
        assert_eq!(mask_cpf("123456789"), "123.456.789");
        assert_eq!(mask_cpf("1234567890"), "123.456.789-0");
    }

    #[test]
    fn test_cpf_is_idempotent() {
        let masked = mask_cpf("12345678901");
        assert_eq!(mask_cpf(&masked), masked);
    }

    #[test]
    fn test_cpf_ignores_letters_and_extra_digits() {
        assert_eq!(mask_cpf("a1b2c3 456.789-0123"), "123.456.789-01");
    }

    #[test]
    fn test_phone_mobile() {
        assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
    }

    #[test]
    fn test_phone_landline() {
        assert_eq!(mask_phone("1187654321"), "(11) 8765-4321");
    }

    #[test]
    fn test_phone_progressive() {
        assert_eq!(mask_phone("1"), "1");
        assert_eq!(mask_phone("11"), "11");
        assert_eq!(mask_phone("119"), "(11) 9");
        assert_eq!(mask_phone("(11) 98765-4321"), "(11) 98765-4321");
    }

    #[test]
    fn test_digits_only_empty() {
        assert_eq!(digits_only("()- ."), "");
    }
}
