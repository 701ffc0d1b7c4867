//! Recipient email address.

use std::fmt;
use std::sync::OnceLock;

use lettre::address::AddressError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length of a full address (RFC 5321 path limit minus brackets).
pub const EMAIL_ADDRESS_MAX: usize = 254;
/// Maximum length of the local part.
pub const EMAIL_LOCAL_PART_MAX: usize = 64;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailAddressValidationError {
    Empty,
    SurroundingWhitespace,
    TooLong { max: usize },
    MissingAtSign,
    LocalPartTooLong { max: usize },
    InvalidLocalPart,
    InvalidDomain,
}

impl fmt::Display for EmailAddressValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "email must not have leading or trailing whitespace")
            }
            Self::TooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::MissingAtSign => write!(f, "email must contain a single @ separator"),
            Self::LocalPartTooLong { max } => {
                write!(f, "email local part must be at most {max} characters")
            }
            Self::InvalidLocalPart => write!(f, "email local part contains invalid characters"),
            Self::InvalidDomain => write!(f, "email domain is not a valid host name"),
        }
    }
}

impl std::error::Error for EmailAddressValidationError {}

static DOMAIN_RE: OnceLock<Regex> = OnceLock::new();

fn domain_regex() -> &'static Regex {
    DOMAIN_RE.get_or_init(|| {
        // At least two labels; the final label is alphabetic or an IDNA
        // A-label. Labels may carry non-ASCII letters.
        let label = r"[\p{L}\p{N}]([\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?";
        let tld = r"(\p{L}{2,63}|(?i:xn--[a-z0-9-]{1,59}))";
        let pattern = format!(r"^({label}\.)+{tld}$");
        Regex::new(&pattern)
            .unwrap_or_else(|error| panic!("domain regex failed to compile: {error}"))
    })
}

/// Check the parts against the grammar the mail transport parses with.
fn check_mailbox_grammar(local: &str, domain: &str) -> Result<(), EmailAddressValidationError> {
    match lettre::Address::new(local, domain) {
        Ok(_) => Ok(()),
        Err(AddressError::InvalidUser) => Err(EmailAddressValidationError::InvalidLocalPart),
        Err(AddressError::InvalidDomain) => Err(EmailAddressValidationError::InvalidDomain),
        Err(_) => Err(EmailAddressValidationError::MissingAtSign),
    }
}

/// A syntactically valid email address.
///
/// ## Invariants
/// - Non-empty, no surrounding whitespace, at most [`EMAIL_ADDRESS_MAX`]
///   characters.
/// - Exactly one `@` outside the local part; the local part is at most
///   [`EMAIL_LOCAL_PART_MAX`] characters and follows RFC 6531, so UTF-8 and
///   quoted local parts are accepted.
/// - The domain is a dotted host name whose final label is alphabetic.
///
/// # Examples
/// ```
/// use open_tracker::domain::EmailAddress;
///
/// let address = EmailAddress::new("a@example.com").expect("valid address");
/// assert_eq!(address.as_ref(), "a@example.com");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(address: impl Into<String>) -> Result<Self, EmailAddressValidationError> {
        Self::from_owned(address.into())
    }

    fn from_owned(address: String) -> Result<Self, EmailAddressValidationError> {
        if address.is_empty() {
            return Err(EmailAddressValidationError::Empty);
        }
        if address.trim() != address {
            return Err(EmailAddressValidationError::SurroundingWhitespace);
        }
        if address.chars().count() > EMAIL_ADDRESS_MAX {
            return Err(EmailAddressValidationError::TooLong {
                max: EMAIL_ADDRESS_MAX,
            });
        }

        // Quoted local parts may contain `@`, so split on the last one.
        let Some((local, domain)) = address.rsplit_once('@') else {
            return Err(EmailAddressValidationError::MissingAtSign);
        };
        if local.is_empty() || domain.is_empty() {
            return Err(EmailAddressValidationError::MissingAtSign);
        }
        if local.chars().count() > EMAIL_LOCAL_PART_MAX {
            return Err(EmailAddressValidationError::LocalPartTooLong {
                max: EMAIL_LOCAL_PART_MAX,
            });
        }
        check_mailbox_grammar(local, domain)?;
        if !domain_regex().is_match(domain) {
            return Err(EmailAddressValidationError::InvalidDomain);
        }

        Ok(Self(address))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailAddressValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
