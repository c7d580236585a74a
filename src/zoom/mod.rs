//! HTTP client for the Zoom cloud recording API.
//!
//! [`RecordingsApi`] is the seam the collector and the trash executor call
//! through. [`ZoomClient`] is the production implementation; tests supply
//! scripted fakes.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::{Config, DateRange};

pub mod error;
pub mod models;

pub use error::ZoomError;
pub use models::{AccessToken, Meeting, RecordingFile, RecordingType, RecordingsPage, UserInfo};

/// Largest page the recordings listing accepts.
pub const PAGE_SIZE: u32 = 300;

/// How a meeting is addressed in a recording URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingRef<'a> {
    Uuid(&'a str),
    Id(u64),
}

/// Operations the recording workflows need from the provider.
#[async_trait]
pub trait RecordingsApi: Send + Sync {
    /// Fetch one page of recordings. An empty `page_token` requests the first page.
    async fn list_recordings_page(
        &self,
        range: &DateRange,
        page_token: &str,
    ) -> Result<RecordingsPage, ZoomError>;

    /// Move one recording file to the trash. Never deletes permanently.
    async fn trash_recording_file(
        &self,
        meeting: MeetingRef<'_>,
        file_id: &str,
    ) -> Result<(), ZoomError>;
}

pub struct ZoomClient {
    client: Client,
    api_base_url: String,
    access_token: String,
}

impl ZoomClient {
    /// Exchange the account credentials for a bearer token.
    pub async fn connect(config: &Config) -> Result<Self, ZoomError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!("Requesting Zoom access token");

        let credentials = &config.credentials;
        let response = client
            .post(&config.oauth_url)
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", credentials.account_id.as_str()),
            ])
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .send()
            .await?;

        let token: AccessToken = decode(response).await?;
        debug!(
            "Access token obtained (type: {:?}, expires in {:?}s, scope: {:?})",
            token.token_type, token.expires_in, token.scope
        );

        Ok(Self::with_token(
            client,
            &config.api_base_url,
            token.access_token,
        ))
    }

    /// Build a client around an existing token.
    pub fn with_token(client: Client, api_base_url: &str, access_token: String) -> Self {
        Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Identity of the account the token was issued for.
    pub async fn current_user(&self) -> Result<UserInfo, ZoomError> {
        let url = self.endpoint(&["users", "me"])?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        decode(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ZoomError> {
        let mut url = Url::parse(&self.api_base_url).map_err(|e| ZoomError::BaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| ZoomError::BaseUrl {
                url: self.api_base_url.clone(),
                reason: "cannot have a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl RecordingsApi for ZoomClient {
    async fn list_recordings_page(
        &self,
        range: &DateRange,
        page_token: &str,
    ) -> Result<RecordingsPage, ZoomError> {
        let url = self.endpoint(&["accounts", "me", "recordings"])?;
        let from = range.from.to_string();
        let to = range.to.to_string();
        let page_size = PAGE_SIZE.to_string();

        debug!("GET {} (next_page_token: {:?})", url, page_token);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("page_size", page_size.as_str()),
                ("next_page_token", page_token),
            ])
            .send()
            .await?;

        decode(response).await
    }

    async fn trash_recording_file(
        &self,
        meeting: MeetingRef<'_>,
        file_id: &str,
    ) -> Result<(), ZoomError> {
        let meeting_segment = match meeting {
            MeetingRef::Uuid(uuid) => uuid_path_segment(uuid),
            MeetingRef::Id(id) => id.to_string(),
        };
        let url = self.endpoint(&["meetings", &meeting_segment, "recordings", file_id])?;

        debug!("DELETE {} (action=trash)", url);

        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.access_token)
            .query(&[("action", "trash")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ZoomError::from_response(status, &body));
        }
        Ok(())
    }
}

/// Path segment for a meeting UUID, before URL encoding.
///
/// UUIDs beginning with `/` or containing `//` must be double-encoded; the
/// URL builder applies the second pass.
fn uuid_path_segment(uuid: &str) -> String {
    if uuid.starts_with('/') || uuid.contains("//") {
        url::form_urlencoded::byte_serialize(uuid.as_bytes()).collect()
    } else {
        uuid.to_string()
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ZoomError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ZoomError::from_response(status, &body));
    }

    Ok(serde_json::from_str(&body)?)
}
