//! Reqwest-backed Identity Toolkit adapter.
//!
//! Every sign-in flavour returns a bare token pair, so successful calls are
//! followed by `accounts:lookup` to fill in the profile and timestamps.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    ErrorEnvelopeDto, IdpRequestDto, LookupRequestDto, LookupResponseDto, OobCodeRequestDto,
    PasswordRequestDto, TokenResponseDto,
};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{Credentials, EmailAddress, FederatedCredential, Identity};
use crate::outbound::http::{is_timeout_status, status_message};

/// Public Identity Toolkit v1 endpoint.
pub const DEFAULT_IDENTITY_TOOLKIT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1/";

const IDP_REQUEST_URI: &str = "http://localhost";

/// REST error messages and the provider codes they correspond to. Messages
/// not listed here are converted mechanically by [`normalise_error_code`].
const REST_CODES: &[(&str, &str)] = &[
    ("EMAIL_NOT_FOUND", "auth/user-not-found"),
    ("INVALID_PASSWORD", "auth/wrong-password"),
    ("INVALID_LOGIN_CREDENTIALS", "auth/invalid-credential"),
    ("INVALID_IDP_RESPONSE", "auth/invalid-credential"),
    ("USER_DISABLED", "auth/user-disabled"),
    ("EMAIL_EXISTS", "auth/email-already-in-use"),
    ("WEAK_PASSWORD", "auth/weak-password"),
    ("INVALID_EMAIL", "auth/invalid-email"),
    ("MISSING_PASSWORD", "auth/missing-password"),
    ("TOO_MANY_ATTEMPTS_TRY_LATER", "auth/too-many-requests"),
    ("FEDERATED_USER_ID_ALREADY_LINKED", "auth/credential-already-in-use"),
];

/// Identity provider adapter for the Identity Toolkit REST API.
pub struct FirebaseIdentityProvider {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl FirebaseIdentityProvider {
    /// Build an adapter with an explicit request timeout.
    ///
    /// `endpoint` must end with a slash so method names resolve beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    fn method_url(&self, method: &str) -> Result<Url, IdentityProviderError> {
        let mut url = self
            .endpoint
            .join(&format!("./accounts:{method}"))
            .map_err(|err| IdentityProviderError::transport(format!("invalid endpoint: {err}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, IdentityProviderError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method)?)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, bytes.as_ref());
            debug!(method, %status, %error, "identity toolkit call failed");
            return Err(error);
        }

        serde_json::from_slice(bytes.as_ref()).map_err(|error| {
            IdentityProviderError::decode(format!("invalid accounts:{method} payload: {error}"))
        })
    }

    async fn complete_sign_in(
        &self,
        tokens: TokenResponseDto,
    ) -> Result<Identity, IdentityProviderError> {
        let lookup: LookupResponseDto = self
            .call(
                "lookup",
                &LookupRequestDto {
                    id_token: &tokens.id_token,
                },
            )
            .await?;
        lookup
            .into_identity(tokens)
            .map_err(IdentityProviderError::decode)
    }

    async fn password_flow(
        &self,
        method: &str,
        credentials: &Credentials,
    ) -> Result<Identity, IdentityProviderError> {
        let tokens: TokenResponseDto = self
            .call(
                method,
                &PasswordRequestDto {
                    email: credentials.email().as_ref(),
                    password: credentials.password(),
                    return_secure_token: true,
                },
            )
            .await?;
        self.complete_sign_in(tokens).await
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, IdentityProviderError> {
        self.password_flow("signInWithPassword", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<Identity, IdentityProviderError> {
        self.password_flow("signUp", credentials).await
    }

    async fn request_password_reset(
        &self,
        email: &EmailAddress,
    ) -> Result<(), IdentityProviderError> {
        let _: serde::de::IgnoredAny = self
            .call(
                "sendOobCode",
                &OobCodeRequestDto {
                    request_type: "PASSWORD_RESET",
                    email: email.as_ref(),
                },
            )
            .await?;
        Ok(())
    }

    async fn authenticate_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<Identity, IdentityProviderError> {
        let tokens: TokenResponseDto = self
            .call(
                "signInWithIdp",
                &IdpRequestDto {
                    post_body: idp_post_body(credential),
                    request_uri: IDP_REQUEST_URI,
                    return_secure_token: true,
                    return_idp_credential: true,
                },
            )
            .await?;
        self.complete_sign_in(tokens).await
    }
}

fn idp_post_body(credential: &FederatedCredential) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id_token", credential.id_token())
        .append_pair("providerId", credential.provider_id())
        .finish()
}

/// Convert a REST error message such as `WEAK_PASSWORD : Password should be
/// at least 6 characters` into a provider code such as `auth/weak-password`.
fn normalise_error_code(message: &str) -> String {
    let token = message
        .split_once(':')
        .map_or(message, |(head, _)| head)
        .trim();
    REST_CODES
        .iter()
        .find(|(rest, _)| *rest == token)
        .map_or_else(
            || format!("auth/{}", token.to_ascii_lowercase().replace('_', "-")),
            |(_, code)| (*code).to_owned(),
        )
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if is_timeout_status(status) {
        return IdentityProviderError::timeout(status_message(status, body));
    }
    if !status.is_client_error() {
        return IdentityProviderError::transport(status_message(status, body));
    }
    match serde_json::from_slice::<ErrorEnvelopeDto>(body) {
        Ok(envelope) => IdentityProviderError::rejected(normalise_error_code(&envelope.error.message)),
        Err(_) if status == StatusCode::TOO_MANY_REQUESTS => {
            IdentityProviderError::rejected("auth/too-many-requests")
        }
        Err(_) => IdentityProviderError::decode(status_message(status, body)),
    }
}
