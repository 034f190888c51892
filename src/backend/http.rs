//! HTTP chat backend.

use crate::backend::{ChatBackend, ChatReply, ChatRequest};
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to the companion backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    url: String,
}

impl HttpBackend {
    /// Build a backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        } else {
            builder = builder.timeout(None);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }

    /// Endpoint messages are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatBackend for HttpBackend {
    fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        debug!(url = %self.url, session_id = %request.session_id, "posting message");

        let response = self.client.post(&self.url).json(request).send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "backend returned an error status");
            return Err(Error::BackendStatus(status.as_u16()));
        }

        let reply: ChatReply = response.json()?;
        debug!(chars = reply.response.len(), "received reply");
        Ok(reply)
    }
}
