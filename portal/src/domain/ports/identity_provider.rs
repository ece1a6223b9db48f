//! Driven port for the external identity provider.
//!
//! The auth controller talks to this trait only, so it never learns which
//! hosted service (or test double) sits behind it.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Credentials, EmailAddress, FederatedCredential, Identity, SessionToken, Uid};

define_port_error! {
    /// Errors surfaced by identity provider adapters.
    pub enum IdentityProviderError {
        /// Provider answered and refused the request with a provider code
        /// such as `auth/user-not-found`.
        Rejected { code: String } =>
            "identity provider rejected request: {code}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "identity provider transport failed: {message}",
        /// Provider call exceeded its timeout.
        Timeout { message: String } =>
            "identity provider timeout: {message}",
        /// Provider response could not be decoded.
        Decode { message: String } =>
            "identity provider response decode failed: {message}",
    }
}

/// Port for the four identity operations the auth form needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with email and password.
    async fn authenticate(&self, credentials: &Credentials)
    -> Result<Identity, IdentityProviderError>;

    /// Create an account and sign it in.
    async fn register(&self, credentials: &Credentials) -> Result<Identity, IdentityProviderError>;

    /// Send a password-reset email.
    async fn request_password_reset(
        &self,
        email: &EmailAddress,
    ) -> Result<(), IdentityProviderError>;

    /// Exchange a federated provider token for a session.
    async fn authenticate_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<Identity, IdentityProviderError>;
}

/// In-memory provider with one known account.
///
/// `demo@example.com` / `Password1` signs in; registering that address
/// reports `auth/email-already-in-use`; any other sign-in reports
/// `auth/invalid-credential`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    /// Email of the fixture account.
    pub const EMAIL: &'static str = "demo@example.com";
    /// Password of the fixture account.
    pub const PASSWORD: &'static str = "Password1";
    const UID: &'static str = "fixture-uid-0001";

    fn identity(email: &str) -> Result<Identity, IdentityProviderError> {
        let uid = Uid::new(Self::UID)
            .map_err(|err| IdentityProviderError::decode(format!("invalid fixture uid: {err}")))?;
        Ok(Identity::builder(uid)
            .email(Some(email.to_owned()))
            .display_name(Some("Demo User".to_owned()))
            .email_verified(true)
            .session(SessionToken::new("fixture-id-token", "fixture-refresh-token"))
            .build())
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, IdentityProviderError> {
        if credentials.email().as_ref() == Self::EMAIL && credentials.password() == Self::PASSWORD
        {
            Self::identity(Self::EMAIL)
        } else {
            Err(IdentityProviderError::rejected("auth/invalid-credential"))
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<Identity, IdentityProviderError> {
        if credentials.email().as_ref() == Self::EMAIL {
            Err(IdentityProviderError::rejected("auth/email-already-in-use"))
        } else {
            Self::identity(credentials.email().as_ref())
        }
    }

    async fn request_password_reset(
        &self,
        email: &EmailAddress,
    ) -> Result<(), IdentityProviderError> {
        if email.as_ref() == Self::EMAIL {
            Ok(())
        } else {
            Err(IdentityProviderError::rejected("auth/user-not-found"))
        }
    }

    async fn authenticate_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<Identity, IdentityProviderError> {
        if credential.provider_id() == FederatedCredential::GOOGLE {
            Self::identity(Self::EMAIL)
        } else {
            Err(IdentityProviderError::rejected("auth/operation-not-allowed"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{AuthForm, AuthMode, Submission};
    use rstest::rstest;

    fn credentials(mode: AuthMode, email: &str, password: &str) -> Credentials {
        let mut form = AuthForm::empty(mode);
        form.set_email(email);
        form.set_password(password).expect("mode has password");
        if mode == AuthMode::SignUp {
            form.set_confirm_password(password).expect("sign-up has confirmation");
        }
        match form.validate().expect("fixture inputs are valid") {
            Submission::SignIn(credentials) | Submission::SignUp(credentials) => credentials,
            Submission::PasswordReset(_) => panic!("password modes only"),
        }
    }

    #[rstest]
    #[case("demo@example.com", "Password1", None)]
    #[case("demo@example.com", "Password2", Some("auth/invalid-credential"))]
    #[case("other@example.com", "Password1", Some("auth/invalid-credential"))]
    #[tokio::test]
    async fn fixture_authenticates_the_known_account(
        #[case] email: &str,
        #[case] password: &str,
        #[case] rejected_with: Option<&str>,
    ) {
        let provider = FixtureIdentityProvider;
        let result = provider
            .authenticate(&credentials(AuthMode::SignIn, email, password))
            .await;
        match (rejected_with, result) {
            (None, Ok(identity)) => assert_eq!(identity.email(), Some(email)),
            (Some(code), Err(err)) => assert_eq!(err, IdentityProviderError::rejected(code)),
            (None, Err(err)) => panic!("expected success, got error: {err:?}"),
            (Some(_), Ok(identity)) => panic!("expected failure, got success: {identity:?}"),
        }
    }

    #[tokio::test]
    async fn fixture_refuses_to_register_the_known_account() {
        let err = FixtureIdentityProvider
            .register(&credentials(AuthMode::SignUp, "demo@example.com", "Password1"))
            .await
            .expect_err("known account exists");
        assert_eq!(err.to_string(), "identity provider rejected request: auth/email-already-in-use");
    }
}
