//! Wire shapes for the OAuth token exchange and FCM v1 `messages:send`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct AssertionClaims<'a> {
    pub(super) iss: &'a str,
    pub(super) scope: &'a str,
    pub(super) aud: &'a str,
    pub(super) iat: i64,
    pub(super) exp: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SendRequestDto<'a> {
    pub(super) message: MessageDto<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct MessageDto<'a> {
    pub(super) token: &'a str,
    pub(super) data: &'a BTreeMap<String, String>,
}
