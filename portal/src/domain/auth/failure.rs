//! Categorisation of identity provider failures into user-facing messages.
//!
//! Provider codes are looked up in a fixed table. Anything the table does not
//! name falls through to the generic per-operation "try again" message.

use std::fmt;

use serde::Serialize;

use crate::domain::ports::IdentityProviderError;

/// Provider call the failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOperation {
    /// Email and password sign-in.
    SignIn,
    /// Account registration.
    SignUp,
    /// Password-reset request.
    PasswordReset,
    /// Federated (identity-provider token) sign-in.
    FederatedSignIn,
}

impl AuthOperation {
    const fn generic_message(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in failed. Please try again.",
            Self::SignUp => "Sign up failed. Please try again.",
            Self::PasswordReset => "Password reset failed. Please try again.",
            Self::FederatedSignIn => "Google Sign-In failed. Please try again.",
        }
    }
}

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Unknown account, wrong password or malformed email.
    InvalidCredentials,
    /// The email or federated identity is already registered.
    AccountExists,
    /// The provider refused the password as too weak.
    WeakPassword,
    /// The account exists but is disabled.
    DisabledAccount,
    /// A federated sign-in prompt was blocked or dismissed.
    PopupDismissed,
    /// Transport failure before a provider answer arrived.
    Network,
    /// No answer within the configured budget.
    TimedOut,
    /// Anything else.
    Unknown,
}

const PROVIDER_CODES: &[(&str, FailureCategory, &str)] = &[
    (
        "auth/user-not-found",
        FailureCategory::InvalidCredentials,
        "No user found with this email.",
    ),
    (
        "auth/wrong-password",
        FailureCategory::InvalidCredentials,
        "Incorrect password.",
    ),
    (
        "auth/invalid-credential",
        FailureCategory::InvalidCredentials,
        "Incorrect email or password.",
    ),
    (
        "auth/invalid-email",
        FailureCategory::InvalidCredentials,
        "Invalid email address.",
    ),
    (
        "auth/user-disabled",
        FailureCategory::DisabledAccount,
        "This user account has been disabled.",
    ),
    (
        "auth/email-already-in-use",
        FailureCategory::AccountExists,
        "Email is already registered.",
    ),
    (
        "auth/account-exists-with-different-credential",
        FailureCategory::AccountExists,
        "An account already exists with a different credential.",
    ),
    (
        "auth/weak-password",
        FailureCategory::WeakPassword,
        "Password is too weak.",
    ),
    (
        "auth/popup-blocked",
        FailureCategory::PopupDismissed,
        "Pop-up blocked. Please enable pop-ups.",
    ),
    (
        "auth/popup-closed-by-user",
        FailureCategory::PopupDismissed,
        "Sign-in popup was closed.",
    ),
    (
        "auth/cancelled-popup-request",
        FailureCategory::PopupDismissed,
        "Sign-in popup was closed.",
    ),
    (
        "auth/network-request-failed",
        FailureCategory::Network,
        NETWORK_MESSAGE,
    ),
];

const NETWORK_MESSAGE: &str = "Network error. Check your connection and try again.";
const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";

/// Categorised provider failure stored in [`crate::domain::AuthStatus::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFailure {
    operation: AuthOperation,
    category: FailureCategory,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AuthFailure {
    /// Categorise a provider rejection code.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{AuthFailure, AuthOperation, FailureCategory};
    ///
    /// let known = AuthFailure::from_code(AuthOperation::SignUp, "auth/email-already-in-use");
    /// assert_eq!(known.category(), FailureCategory::AccountExists);
    ///
    /// let unknown = AuthFailure::from_code(AuthOperation::SignUp, "auth/quota-exceeded");
    /// assert_eq!(unknown.category(), FailureCategory::Unknown);
    /// assert_eq!(unknown.message(), "Sign up failed. Please try again.");
    /// ```
    pub fn from_code(operation: AuthOperation, code: &str) -> Self {
        let (category, message) = PROVIDER_CODES
            .iter()
            .find(|(known, _, _)| *known == code)
            .map_or(
                (FailureCategory::Unknown, operation.generic_message()),
                |(_, category, message)| (*category, *message),
            );
        Self {
            operation,
            category,
            message,
            code: Some(code.to_owned()),
        }
    }

    /// Categorise any error returned by the identity provider port.
    pub fn from_provider_error(operation: AuthOperation, error: &IdentityProviderError) -> Self {
        match error {
            IdentityProviderError::Rejected { code } => Self::from_code(operation, code),
            IdentityProviderError::Transport { .. } => {
                Self::without_code(operation, FailureCategory::Network, NETWORK_MESSAGE)
            }
            IdentityProviderError::Timeout { .. } => Self::timed_out(operation),
            IdentityProviderError::Decode { .. } => Self::without_code(
                operation,
                FailureCategory::Unknown,
                operation.generic_message(),
            ),
        }
    }

    /// Failure for a call that exceeded the controller's budget.
    pub const fn timed_out(operation: AuthOperation) -> Self {
        Self::without_code(operation, FailureCategory::TimedOut, TIMEOUT_MESSAGE)
    }

    const fn without_code(
        operation: AuthOperation,
        category: FailureCategory,
        message: &'static str,
    ) -> Self {
        Self {
            operation,
            category,
            message,
            code: None,
        }
    }

    /// Operation that failed.
    pub const fn operation(&self) -> AuthOperation {
        self.operation
    }

    /// User-facing category.
    pub const fn category(&self) -> FailureCategory {
        self.category
    }

    /// Inline message for the form.
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Provider code, when the provider answered.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for AuthFailure {}
