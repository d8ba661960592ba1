//! Reqwest-backed Firebase Cloud Messaging adapter.
//!
//! This adapter owns transport details only: minting an OAuth access token
//! from the service-account key, sending one HTTP v1 request per device
//! token, and tallying the per-token results. Tokens are not cached; each
//! multicast performs a fresh exchange.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use mockable::Clock;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::credentials::ServiceAccountKey;
use super::dto::{AssertionClaims, MessageDto, SendRequestDto, TokenResponseDto};
use crate::domain::ports::{
    MulticastMessage, MulticastReport, NotificationDispatchError, NotificationDispatcher,
};

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const FCM_API_BASE: &str = "https://fcm.googleapis.com";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

/// FCM HTTP v1 dispatcher for one Firebase project.
pub struct FcmHttpDispatcher {
    client: Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    send_url: Url,
    clock: Arc<dyn Clock>,
}

impl FcmHttpDispatcher {
    /// Build a dispatcher from a service-account key.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDispatchError::Credentials`] when the private key
    /// is not valid RSA PEM, and [`NotificationDispatchError::Transport`] when
    /// the HTTP client cannot be constructed.
    pub fn new(
        key: ServiceAccountKey,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NotificationDispatchError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|err| {
            NotificationDispatchError::credentials(format!("invalid private key: {err}"))
        })?;
        let send_url = send_url(FCM_API_BASE, &key.project_id)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self {
            client,
            key,
            encoding_key,
            send_url,
            clock,
        })
    }

    fn sign_assertion(&self, issued_at: DateTime<Utc>) -> Result<String, NotificationDispatchError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.key.private_key_id);
        let claims = assertion_claims(&self.key, issued_at);
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|err| {
            NotificationDispatchError::credentials(format!("failed to sign assertion: {err}"))
        })
    }

    async fn access_token(&self) -> Result<String, NotificationDispatchError> {
        let assertion = self.sign_assertion(self.clock.utc())?;
        let response = self
            .client
            .post(self.key.token_uri.as_str())
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(NotificationDispatchError::credentials(format!(
                "token exchange failed with {}",
                status_message(status, body.as_ref())
            )));
        }
        let decoded: TokenResponseDto = serde_json::from_slice(body.as_ref()).map_err(|err| {
            NotificationDispatchError::credentials(format!("invalid token response: {err}"))
        })?;
        Ok(decoded.access_token)
    }

    /// Send to one device. `Ok(false)` is a per-token rejection.
    async fn send_one(
        &self,
        access_token: &str,
        token: &str,
        message: &MulticastMessage,
    ) -> Result<bool, NotificationDispatchError> {
        let body = SendRequestDto {
            message: MessageDto {
                token,
                data: &message.data,
            },
        };
        let response = self
            .client
            .post(self.send_url.clone())
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if aborts_multicast(status) {
            return Err(NotificationDispatchError::rejected(
                status.as_u16(),
                body_preview(body.as_ref()),
            ));
        }
        debug!(
            status = status.as_u16(),
            detail = %body_preview(body.as_ref()),
            "device token rejected"
        );
        Ok(false)
    }
}

#[async_trait]
impl NotificationDispatcher for FcmHttpDispatcher {
    async fn send_multicast(
        &self,
        message: &MulticastMessage,
    ) -> Result<MulticastReport, NotificationDispatchError> {
        let mut report = MulticastReport::default();
        if message.tokens.is_empty() {
            return Ok(report);
        }

        let access_token = self.access_token().await?;
        for token in &message.tokens {
            if self.send_one(&access_token, token, message).await? {
                report.success_count += 1;
            } else {
                report.failure_count += 1;
            }
        }
        Ok(report)
    }
}

fn send_url(base: &str, project_id: &str) -> Result<Url, NotificationDispatchError> {
    Url::parse(&format!("{base}/v1/projects/{project_id}/messages:send")).map_err(|err| {
        NotificationDispatchError::credentials(format!("invalid project id {project_id:?}: {err}"))
    })
}

fn assertion_claims(key: &ServiceAccountKey, issued_at: DateTime<Utc>) -> AssertionClaims<'_> {
    let iat = issued_at.timestamp();
    AssertionClaims {
        iss: &key.client_email,
        scope: FCM_SCOPE,
        aud: &key.token_uri,
        iat,
        exp: iat + ASSERTION_LIFETIME_SECONDS,
    }
}

/// Authentication and quota failures apply to every token in the batch.
fn aborts_multicast(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    ) || status.is_server_error()
}

fn map_transport_error(error: reqwest::Error) -> NotificationDispatchError {
    NotificationDispatchError::transport(error.to_string())
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
