//! Field validation for checkout input.
//!
//! Everything here runs before any network call; failures map to
//! per-field messages so the form can highlight the offending input.

use std::collections::BTreeMap;
use std::fmt;

use crate::checkout::{BillingAddress, CustomerInfo};

/// The seven emirates.
pub const UAE_EMIRATES: [&str; 7] = [
    "Abu Dhabi",
    "Dubai",
    "Sharjah",
    "Ajman",
    "Umm Al Quwain",
    "Ras Al Khaimah",
    "Fujairah",
];

/// Cities the storefront delivers to.
pub const UAE_CITIES: [&str; 20] = [
    "Dubai",
    "Abu Dhabi",
    "Sharjah",
    "Ajman",
    "Al Ain",
    "Fujairah",
    "Ras Al Khaimah",
    "Umm Al Quwain",
    "Khor Fakkan",
    "Dibba",
    "Kalba",
    "Madinat Zayed",
    "Liwa",
    "Ghayathi",
    "Ruwais",
    "Masafi",
    "Hatta",
    "Jebel Ali",
    "Dubai Marina",
    "Downtown Dubai",
];

/// UAE mobile operator prefixes.
const MOBILE_PREFIXES: [&str; 7] = ["50", "51", "52", "54", "55", "56", "58"];

/// Per-field validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Fold another set of errors into this one.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", joined.join(", "))
    }
}

/// Normalize a UAE mobile number, returning the cleaned digits when valid.
///
/// Accepts an optional `+971`, `00971`, `971`, or `0` prefix followed by a
/// two-digit operator code and seven digits; whitespace is ignored.
pub fn normalize_uae_phone(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }

    let rest = cleaned
        .strip_prefix("+971")
        .or_else(|| cleaned.strip_prefix("00971"))
        .or_else(|| cleaned.strip_prefix("971"))
        .or_else(|| cleaned.strip_prefix('0'))
        .unwrap_or(&cleaned);

    if rest.len() != 9 || !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let operator = &rest[..2];
    if !MOBILE_PREFIXES.contains(&operator) {
        return None;
    }

    Some(cleaned)
}

/// Check an Emirates ID of the form 784-YYYY-XXXXXXX-X.
pub fn is_valid_emirates_id(id: &str) -> bool {
    let parts: Vec<&str> = id.split('-').collect();
    let [prefix, year, serial, check] = parts.as_slice() else {
        return false;
    };
    *prefix == "784"
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && serial.len() == 7
        && serial.chars().all(|c| c.is_ascii_digit())
        && check.len() == 1
        && check.chars().all(|c| c.is_ascii_digit())
}

/// Minimal structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let no_ws = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('@');
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    no_ws(local) && no_ws(host) && no_ws(tld)
}

/// Validate buyer contact details.
pub fn validate_customer(info: &CustomerInfo) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if info.name.trim().len() < 2 {
        errors.insert("name", "Name must be at least 2 characters long");
    }

    if info.email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(&info.email) {
        errors.insert("email", "Please enter a valid email address");
    }

    if info.phone.is_empty() {
        errors.insert("phone", "Phone number is required");
    } else if normalize_uae_phone(&info.phone).is_none() {
        errors.insert(
            "phone",
            "Please enter a valid UAE phone number (e.g., +971 50 123 4567)",
        );
    }

    if let Some(emirates_id) = &info.emirates_id {
        if !is_valid_emirates_id(emirates_id) {
            errors.insert(
                "emiratesId",
                "Please enter a valid Emirates ID (format: 784-YYYY-XXXXXXX-X)",
            );
        }
    }

    errors
}

/// Validate a billing address against configurable city/emirate lists.
pub fn validate_billing_address_with(
    address: &BillingAddress,
    cities: &[&str],
    emirates: &[&str],
) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if address.street.trim().len() < 5 {
        errors.insert("street", "Street address must be at least 5 characters long");
    }
    if !cities.contains(&address.city.as_str()) {
        errors.insert("city", "Please select a valid city");
    }
    if !emirates.contains(&address.emirate.as_str()) {
        errors.insert("emirate", "Please select a valid emirate");
    }
    if address.country != "UAE" {
        errors.insert("country", "Country must be UAE");
    }

    errors
}

/// Validate a billing address against the default delivery area.
pub fn validate_billing_address(address: &BillingAddress) -> ValidationErrors {
    validate_billing_address_with(address, &UAE_CITIES, &UAE_EMIRATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_prefixes() {
        assert!(normalize_uae_phone("+971 50 123 4567").is_some());
        assert!(normalize_uae_phone("00971501234567").is_some());
        assert!(normalize_uae_phone("971501234567").is_some());
        assert!(normalize_uae_phone("0501234567").is_some());
        assert!(normalize_uae_phone("501234567").is_some());

        // Not a mobile operator code.
        assert!(normalize_uae_phone("0441234567").is_none());
        // Too short.
        assert!(normalize_uae_phone("05012345").is_none());
        assert!(normalize_uae_phone("").is_none());
    }

    #[test]
    fn test_emirates_id() {
        assert!(is_valid_emirates_id("784-1990-1234567-1"));
        assert!(!is_valid_emirates_id("784-90-1234567-1"));
        assert!(!is_valid_emirates_id("123-1990-1234567-1"));
        assert!(!is_valid_emirates_id("784-1990-1234567"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("pet@paws.ae"));
        assert!(!is_valid_email("pet@paws"));
        assert!(!is_valid_email("petpaws.ae"));
        assert!(!is_valid_email("pet @paws.ae"));
    }

    #[test]
    fn test_validate_customer_collects_fields() {
        let info = CustomerInfo {
            name: "A".into(),
            email: "bad".into(),
            phone: "12345".into(),
            emirates_id: Some("nope".into()),
        };
        let errors = validate_customer(&info);
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("phone").is_some());
        assert!(errors.get("emiratesId").is_some());
    }

    #[test]
    fn test_validate_customer_ok() {
        let info = CustomerInfo::new("Sara Khan", "sara@example.com", "+971501234567");
        assert!(validate_customer(&info).is_empty());
    }

    #[test]
    fn test_validate_billing_address() {
        let ok = BillingAddress::new("12 Al Wasl Road", "Dubai", "Dubai");
        assert!(validate_billing_address(&ok).is_empty());

        let bad = BillingAddress {
            street: "x".into(),
            city: "Nowhere".into(),
            emirate: "Atlantis".into(),
            country: "Oman".into(),
            postal_code: None,
        };
        let errors = validate_billing_address(&bad);
        assert!(errors.get("street").is_some());
        assert!(errors.get("city").is_some());
        assert!(errors.get("emirate").is_some());
        assert!(errors.get("country").is_some());
    }
}
