//! Shared HTTP plumbing for the preview strategies.

use log::debug;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::relay::Relay;
use crate::config::ResolverConfig;
use crate::error::{ChatlinksError, ResolveError};

/// One HTTP client plus the relay rule, cloned into every strategy.
///
/// `reqwest::Client` is reference counted, so clones share a connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    relay: Relay,
}

impl Fetcher {
    /// Builds the client from the resolver settings.
    ///
    /// The client timeout equals the configured bound so that no request
    /// can hang, including the ones that are not raced explicitly.
    pub fn new(config: &ResolverConfig) -> Result<Self, ChatlinksError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(config.max_redirects))
            .build()
            .map_err(ChatlinksError::HttpClient)?;

        Ok(Self {
            client,
            relay: Relay::new(config.relay_prefix.clone()),
        })
    }

    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    async fn send(&self, target: &str, relayed: bool) -> Result<Response, ResolveError> {
        let url = if relayed {
            self.relay.wrap(target)
        } else {
            target.to_string()
        };
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response)
    }

    /// Fetches a body as text. Non-2xx statuses are errors.
    pub async fn get_text(&self, target: &str, relayed: bool) -> Result<String, ResolveError> {
        let response = self.send(target, relayed).await?;
        Ok(response.text().await?)
    }

    /// Fetches and decodes a JSON body. Non-2xx statuses are errors.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        target: &str,
        relayed: bool,
    ) -> Result<T, ResolveError> {
        let response = self.send(target, relayed).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
