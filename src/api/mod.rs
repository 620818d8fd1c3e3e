//! Remote Session Service client.
//!
//! One request function per service operation, plus the [`SessionApi`] seam
//! the store drives. Nothing here retains state, retries, or validates beyond
//! the shape of its arguments.

pub mod candidate;
pub mod error;
pub mod session;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::models::candidate::{Candidate, CandidateId};
use crate::models::session::{CreateSessionRequest, Session};
use crate::models::vote::{Decision, VoteOutcome};
pub use error::RequestFailure;

#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn create_session(&self, request: &CreateSessionRequest)
        -> Result<Session, RequestFailure>;

    async fn join_session(
        &self,
        room_code: &str,
        user_name: &str,
    ) -> Result<Session, RequestFailure>;

    async fn get_session(&self, room_code: &str) -> Result<Session, RequestFailure>;

    async fn start_session(
        &self,
        room_code: &str,
        host_name: &str,
    ) -> Result<Session, RequestFailure>;

    async fn get_next_candidate(
        &self,
        room_code: &str,
        user_name: &str,
    ) -> Result<Option<Candidate>, RequestFailure>;

    async fn submit_vote(
        &self,
        room_code: &str,
        user_name: &str,
        candidate_id: CandidateId,
        decision: Decision,
    ) -> Result<VoteOutcome, RequestFailure>;
}

/// [`SessionApi`] over HTTP with reqwest.
#[derive(Clone, Debug)]
pub struct HttpSessionApi {
    client: Client,
    base_url: String,
}

impl HttpSessionApi {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Builds a client whose only timeout is the configured request timeout.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self::new(client, &config.api_base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<Session, RequestFailure> {
        session::create_session(&self.client, &self.base_url, request).await
    }

    async fn join_session(
        &self,
        room_code: &str,
        user_name: &str,
    ) -> Result<Session, RequestFailure> {
        session::join_session(&self.client, &self.base_url, room_code, user_name).await
    }

    async fn get_session(&self, room_code: &str) -> Result<Session, RequestFailure> {
        session::get_session(&self.client, &self.base_url, room_code).await
    }

    async fn start_session(
        &self,
        room_code: &str,
        host_name: &str,
    ) -> Result<Session, RequestFailure> {
        session::start_session(&self.client, &self.base_url, room_code, host_name).await
    }

    async fn get_next_candidate(
        &self,
        room_code: &str,
        user_name: &str,
    ) -> Result<Option<Candidate>, RequestFailure> {
        candidate::get_next_candidate(&self.client, &self.base_url, room_code, user_name).await
    }

    async fn submit_vote(
        &self,
        room_code: &str,
        user_name: &str,
        candidate_id: CandidateId,
        decision: Decision,
    ) -> Result<VoteOutcome, RequestFailure> {
        candidate::submit_vote(
            &self.client,
            &self.base_url,
            room_code,
            user_name,
            candidate_id,
            decision,
        )
        .await
    }
}

/// `{base}/sessions[/{room_code}[/tail...]]` with each segment percent-encoded.
pub(crate) fn sessions_url(
    base_url: &str,
    room_code: Option<&str>,
    tail: &[&str],
) -> Result<Url, RequestFailure> {
    let mut url = Url::parse(base_url).map_err(|e| {
        error!("Invalid service base URL {}: {}", base_url, e);
        RequestFailure::default()
    })?;
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            error!("Service base URL cannot carry a path: {}", base_url);
            RequestFailure::default()
        })?;
        segments.pop_if_empty().push("sessions");
        if let Some(code) = room_code {
            segments.push(code);
        }
        segments.extend(tail);
    }
    Ok(url)
}

/// Sends a request and decodes a 2xx JSON body, mapping everything else to
/// a [`RequestFailure`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> Result<T, RequestFailure> {
    let resp = request.send().await.map_err(|e| {
        error!("{} failed to send: {}", what, e);
        RequestFailure::from(e)
    })?;

    let status = resp.status();
    if status.is_success() {
        let body = resp.json::<T>().await.map_err(|e| {
            error!("{} returned an unreadable body: {}", what, e);
            RequestFailure::from(e)
        })?;
        debug!("{} succeeded ({})", what, status);
        Ok(body)
    } else {
        let text = resp.text().await.unwrap_or_default();
        let failure = RequestFailure::from_body(status.as_u16(), &text);
        error!("{} rejected ({}): {}", what, status, failure);
        Err(failure)
    }
}
