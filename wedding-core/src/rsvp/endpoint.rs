//! Outbound delivery of RSVP payloads.
//!
//! The scripted endpoint is a cross-origin, write-only collaborator: the
//! request is sent and the response is dropped unread. Only a transport
//! failure (DNS, connect, TLS, I/O) counts as an error.

use async_trait::async_trait;
use url::Url;

use super::error::TransportError;
use super::payload::RsvpPayload;

#[async_trait]
pub trait RsvpEndpoint: Send + Sync {
    async fn send(&self, payload: &RsvpPayload) -> Result<(), TransportError>;
}

/// Posts JSON to a fixed URL (e.g. a Google Apps Script deployment).
#[derive(Clone)]
pub struct ScriptEndpoint {
    client: reqwest::Client,
    url: Url,
}

impl ScriptEndpoint {
    pub fn new(url: Url) -> Self {
        ScriptEndpoint {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RsvpEndpoint for ScriptEndpoint {
    async fn send(&self, payload: &RsvpPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        // Status and body are not part of the contract
        tracing::debug!(status = %response.status(), "rsvp endpoint answered");
        Ok(())
    }
}
