//! DTOs for the Identity Toolkit REST API.
//!
//! Token responses carry only the session; the follow-up `accounts:lookup`
//! response carries the profile and timestamps. Both are merged into one
//! domain `Identity`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Identity, IdentityMetadata, SessionToken, Uid};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PasswordRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OobCodeRequestDto<'a> {
    pub(super) request_type: &'static str,
    pub(super) email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IdpRequestDto<'a> {
    pub(super) post_body: String,
    pub(super) request_uri: &'a str,
    pub(super) return_secure_token: bool,
    pub(super) return_idp_credential: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupRequestDto<'a> {
    pub(super) id_token: &'a str,
}

/// Shared shape of the sign-in, sign-up and IdP responses.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TokenResponseDto {
    pub(super) local_id: String,
    pub(super) id_token: String,
    pub(super) refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LookupResponseDto {
    #[serde(default)]
    pub(super) users: Vec<UserRecordDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserRecordDto {
    pub(super) local_id: String,
    pub(super) email: Option<String>,
    pub(super) display_name: Option<String>,
    pub(super) photo_url: Option<String>,
    #[serde(default)]
    pub(super) email_verified: bool,
    /// Milliseconds since the epoch, as a decimal string.
    pub(super) created_at: Option<String>,
    /// Milliseconds since the epoch, as a decimal string.
    pub(super) last_login_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    pub(super) message: String,
}

impl LookupResponseDto {
    /// Merge the record for `tokens.local_id` with the session.
    pub(super) fn into_identity(self, tokens: TokenResponseDto) -> Result<Identity, String> {
        let user = self
            .users
            .into_iter()
            .find(|user| user.local_id == tokens.local_id)
            .ok_or_else(|| format!("lookup returned no record for {}", tokens.local_id))?;
        let uid = Uid::new(user.local_id).map_err(|err| err.to_string())?;
        let metadata = IdentityMetadata {
            created_at: parse_millis(user.created_at.as_deref(), "createdAt")?,
            last_sign_in_at: parse_millis(user.last_login_at.as_deref(), "lastLoginAt")?,
        };

        Ok(Identity::builder(uid)
            .email(user.email)
            .display_name(user.display_name)
            .photo_url(user.photo_url)
            .email_verified(user.email_verified)
            .is_anonymous(false)
            .metadata(metadata)
            .session(SessionToken::new(tokens.id_token, tokens.refresh_token))
            .build())
    }
}

fn parse_millis(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let millis: i64 = raw
        .parse()
        .map_err(|err| format!("{field} is not an integer: {err}"))?;
    DateTime::from_timestamp_millis(millis)
        .map(Some)
        .ok_or_else(|| format!("{field} is out of range: {millis}"))
}
