//! Payload validation for QR generation.
//!
//! Every generation endpoint validates its text payload before any symbol is
//! rendered. Three payload kinds are supported:
//!
//! - **URL**: `http`/`https` scheme, non-empty host, optional path
//! - **Email**: permissive local part and domain with a dot-separated suffix
//! - **Phone**: exactly ten decimal digits, no separators or country code
//!
//! Validation is a pure accept/reject decision. Payloads are never trimmed,
//! case-folded, or otherwise normalized; the string that is validated is the
//! string that ends up in the symbol.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Patterns
// =============================================================================

/// URL pattern: scheme, host without whitespace or `/`, optional path.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/\s]+(?:/\S*)?$").unwrap()
});

/// Email pattern: word characters, dots and hyphens around a single `@`,
/// with at least one dot-separated domain suffix.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").unwrap()
});

/// Phone pattern: exactly ten decimal digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{10}$").unwrap()
});

// =============================================================================
// PayloadKind
// =============================================================================

/// The kind of text payload a QR symbol is generated from.
///
/// The kind selects the validation predicate and labels archive entries and
/// error codes (`qr_code_url_1.png`, `invalid_email`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// An `http` or `https` URL
    Url,

    /// An email address
    Email,

    /// A ten-digit phone number
    Phone,
}

impl PayloadKind {
    /// Get the lowercase label used in archive entry names and error codes.
    pub const fn label(&self) -> &'static str {
        match self {
            PayloadKind::Url => "url",
            PayloadKind::Email => "email",
            PayloadKind::Phone => "phone",
        }
    }

    /// Check a payload against this kind's predicate.
    pub fn validate(&self, payload: &str) -> bool {
        match self {
            PayloadKind::Url => is_valid_url(payload),
            PayloadKind::Email => is_valid_email(payload),
            PayloadKind::Phone => is_valid_phone(payload),
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// Check whether a string is an acceptable URL payload.
///
/// Accepts `http://` or `https://` followed by a non-empty host (no
/// whitespace, no `/`) and an optional `/`-prefixed path without whitespace.
/// Other schemes, schemeless strings, and strings containing whitespace are
/// rejected. The URL is not resolved or fetched.
pub fn is_valid_url(payload: &str) -> bool {
    URL_PATTERN.is_match(payload)
}

/// Check whether a string is an acceptable email payload.
///
/// The pattern is deliberately permissive: word characters, dots and hyphens
/// on both sides of a single `@`, with at least one dot-separated suffix in
/// the domain. No mailbox verification of any sort.
pub fn is_valid_email(payload: &str) -> bool {
    EMAIL_PATTERN.is_match(payload)
}

/// Check whether a string is an acceptable phone payload.
///
/// Exactly ten decimal digits. Separators, spaces, and `+` country prefixes
/// are rejected rather than stripped.
pub fn is_valid_phone(payload: &str) -> bool {
    PHONE_PATTERN.is_match(payload)
}

// =============================================================================
// Tests
// =============================================================================
