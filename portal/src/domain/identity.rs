//! Identity record returned by the identity provider.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use zeroize::Zeroizing;

/// Validation errors for [`Uid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// Provider returned a blank user id.
    EmptyUid,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUid => write!(f, "uid must not be empty"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Provider-assigned user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Uid(String);

impl Uid {
    /// Validate a raw uid.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(IdentityValidationError::EmptyUid);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uid> for String {
    fn from(value: Uid) -> Self {
        value.0
    }
}

/// Session tokens issued on sign-in. Zeroised on drop, never serialised.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionToken {
    id_token: Zeroizing<String>,
    refresh_token: Zeroizing<String>,
}

impl SessionToken {
    /// Wrap provider tokens.
    pub fn new(id_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            id_token: Zeroizing::new(id_token.into()),
            refresh_token: Zeroizing::new(refresh_token.into()),
        }
    }

    /// Short-lived bearer token.
    pub fn id_token(&self) -> &str {
        self.id_token.as_str()
    }

    /// Long-lived refresh token.
    pub fn refresh_token(&self) -> &str {
        self.refresh_token.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Account timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityMetadata {
    /// When the account was created.
    pub created_at: Option<DateTime<Utc>>,
    /// Most recent sign-in.
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Token-free, serialisable view of an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    /// Provider user id.
    pub uid: Uid,
    /// Account email.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Avatar URL.
    pub photo_url: Option<String>,
    /// Whether the email has been verified.
    pub email_verified: bool,
    /// Whether the account is anonymous.
    pub is_anonymous: bool,
    /// Account timestamps.
    pub metadata: IdentityMetadata,
}

/// Authenticated user as reported by the identity provider.
///
/// ## Invariants
/// - `uid` is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    profile: IdentityProfile,
    session: SessionToken,
}

impl Identity {
    /// Start building an identity for `uid`.
    pub fn builder(uid: Uid) -> IdentityBuilder {
        IdentityBuilder {
            profile: IdentityProfile {
                uid,
                email: None,
                display_name: None,
                photo_url: None,
                email_verified: false,
                is_anonymous: false,
                metadata: IdentityMetadata::default(),
            },
            session: SessionToken::default(),
        }
    }

    /// Provider user id.
    pub fn uid(&self) -> &Uid {
        &self.profile.uid
    }

    /// Account email.
    pub fn email(&self) -> Option<&str> {
        self.profile.email.as_deref()
    }

    /// Display name.
    pub fn display_name(&self) -> Option<&str> {
        self.profile.display_name.as_deref()
    }

    /// Whether the email has been verified.
    pub fn email_verified(&self) -> bool {
        self.profile.email_verified
    }

    /// Account timestamps.
    pub fn metadata(&self) -> IdentityMetadata {
        self.profile.metadata
    }

    /// Serialisable, token-free view.
    pub fn profile(&self) -> &IdentityProfile {
        &self.profile
    }

    /// Session tokens.
    pub fn session(&self) -> &SessionToken {
        &self.session
    }
}

/// Builder for [`Identity`].
#[derive(Debug, Clone)]
pub struct IdentityBuilder {
    profile: IdentityProfile,
    session: SessionToken,
}

impl IdentityBuilder {
    /// Set the account email.
    pub fn email(mut self, email: Option<String>) -> Self {
        self.profile.email = email;
        self
    }

    /// Set the display name; blank names are dropped.
    pub fn display_name(mut self, display_name: Option<String>) -> Self {
        self.profile.display_name = display_name.filter(|name| !name.trim().is_empty());
        self
    }

    /// Set the avatar URL; blank URLs are dropped.
    pub fn photo_url(mut self, photo_url: Option<String>) -> Self {
        self.profile.photo_url = photo_url.filter(|url| !url.trim().is_empty());
        self
    }

    /// Set the verification flag.
    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.profile.email_verified = email_verified;
        self
    }

    /// Set the anonymous flag.
    pub fn is_anonymous(mut self, is_anonymous: bool) -> Self {
        self.profile.is_anonymous = is_anonymous;
        self
    }

    /// Set the account timestamps.
    pub fn metadata(mut self, metadata: IdentityMetadata) -> Self {
        self.profile.metadata = metadata;
        self
    }

    /// Attach session tokens.
    pub fn session(mut self, session: SessionToken) -> Self {
        self.session = session;
        self
    }

    /// Finish building.
    pub fn build(self) -> Identity {
        Identity {
            profile: self.profile,
            session: self.session,
        }
    }
}
