//! Validated credential primitives handed to the identity provider port.
//!
//! Raw form input never reaches a port: constructors here trim and check
//! values first, and secrets are wiped from memory on drop.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Validation errors for [`EmailAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailValidationError {
    /// Email was blank once trimmed.
    Missing,
    /// Email does not look like `local@domain.tld`.
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Email is required"),
            Self::Malformed => write!(f, "Invalid email address"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
///
/// ## Invariants
/// - Trimmed, non-empty, exactly one `@`, and a dotted domain part.
///
/// # Examples
/// ```
/// use portal::domain::EmailAddress;
///
/// let email = EmailAddress::parse("  ada@example.com ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(EmailAddress::parse("ada@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate raw input.
    pub fn parse(raw: &str) -> Result<Self, EmailValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Missing);
        }
        if !email_regex().is_match(trimmed) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(trimmed.to_owned()))
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

/// Password that has passed the rules of the mode it was entered in.
///
/// The value keeps caller-provided whitespace and is zeroised on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub(crate) fn new(raw: &str) -> Self {
        Self(Zeroizing::new(raw.to_owned()))
    }

    /// Password string provided by the caller.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Email and password pair accepted by sign-in and sign-up calls.
///
/// Only [`crate::domain::AuthForm::validate`] builds these, so a value of this
/// type has always passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: EmailAddress,
    password: Password,
}

impl Credentials {
    pub(crate) const fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }

    /// Account email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Account password.
    pub fn password(&self) -> &str {
        self.password.expose()
    }
}

/// Token obtained from an external identity provider (for example a Google
/// ID token) and exchanged for a session with ours.
#[derive(Clone, PartialEq, Eq)]
pub struct FederatedCredential {
    provider_id: String,
    id_token: Zeroizing<String>,
}

/// Validation errors for [`FederatedCredential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedCredentialError {
    /// Provider identifier was blank.
    EmptyProvider,
    /// Token was blank.
    EmptyToken,
}

impl fmt::Display for FederatedCredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProvider => write!(f, "provider id must not be empty"),
            Self::EmptyToken => write!(f, "id token must not be empty"),
        }
    }
}

impl std::error::Error for FederatedCredentialError {}

impl FederatedCredential {
    /// Google, the only federated provider the demo offers.
    pub const GOOGLE: &'static str = "google.com";

    /// Build a credential from a provider id such as `google.com` and the
    /// token that provider issued.
    pub fn try_new(provider_id: &str, id_token: &str) -> Result<Self, FederatedCredentialError> {
        let provider_id = provider_id.trim();
        if provider_id.is_empty() {
            return Err(FederatedCredentialError::EmptyProvider);
        }
        let id_token = id_token.trim();
        if id_token.is_empty() {
            return Err(FederatedCredentialError::EmptyToken);
        }
        Ok(Self {
            provider_id: provider_id.to_owned(),
            id_token: Zeroizing::new(id_token.to_owned()),
        })
    }

    /// Provider identifier.
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Provider-issued token.
    pub fn id_token(&self) -> &str {
        self.id_token.as_str()
    }
}

impl fmt::Debug for FederatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FederatedCredential")
            .field("provider_id", &self.provider_id)
            .field("id_token", &"<redacted>")
            .finish()
    }
}
