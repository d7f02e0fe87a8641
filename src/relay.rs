use std::fmt::{self, Display};

use anyhow::Context;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, Instrument};

use crate::{
    config::{RelayConfig, SLACK_URL_VAR},
    webhooks::github::issue_url,
};

mod context;
pub use context::InvocationContext;

mod slack;
use slack::{post_message, Delivery, SlackMessage};

/// Faults that keep an event from being relayed at all.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Payload(#[from] serde_json::Error),
    #[error("invalid Slack webhook URL")]
    Destination(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Result of a single invocation, displayed as the string handed back to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    NoIssueUrl,
    NotConfigured,
    Sent,
    Rejected { status: u16 },
    Error(String),
}

impl Display for RelayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIssueUrl => write!(f, "No issue URL found"),
            Self::NotConfigured => write!(f, "Slack webhook URL not configured"),
            Self::Sent => write!(f, "Message sent to Slack successfully"),
            Self::Rejected { status } => write!(f, "Failed to send message to Slack: {}", status),
            Self::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

fn fault(err: RelayError) -> RelayOutcome {
    // keep the whole cause chain, reqwest puts the actual failure in `source()`
    let message = format!("{:#}", anyhow::Error::from(err));
    error!("error processing webhook: {}", message);
    RelayOutcome::Error(message)
}

/// Forwards GitHub issue events to a Slack incoming webhook.
///
/// The HTTP client is built once and shared by every invocation: it keeps no state tied to a
/// particular request, so concurrent invocations only borrow the relay.
pub struct Relay {
    client: Client,
    slack_url: Option<String>,
}

impl Relay {
    /// Creates a new [`Relay`] posting to the Slack URL of the provided [`RelayConfig`].
    pub fn new(config: &RelayConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("couldn't build HTTP client")?;

        Ok(Self {
            client,
            slack_url: config.slack_url.clone(),
        })
    }

    /// Relays one already parsed event. Never fails: every problem is reported through the
    /// returned [`RelayOutcome`].
    pub async fn handle(&self, event: &Value, context: &InvocationContext) -> RelayOutcome {
        async { self.relay(event).await.unwrap_or_else(fault) }
            .instrument(context.span())
            .await
    }

    /// Parses the raw request body, then relays it with [`Relay::handle`]. A body that isn't
    /// JSON is a malformed event and ends up as [`RelayOutcome::Error`].
    pub async fn handle_payload(&self, payload: &[u8], context: &InvocationContext) -> RelayOutcome {
        let parsed = context.span().in_scope(|| {
            debug!("raw payload: {}", String::from_utf8_lossy(payload));
            serde_json::from_slice::<Value>(payload).map_err(|e| fault(e.into()))
        });

        match parsed {
            Ok(event) => self.handle(&event, context).await,
            Err(outcome) => outcome,
        }
    }

    async fn relay(&self, event: &Value) -> Result<RelayOutcome, RelayError> {
        debug!("received event: {}", event);

        let issue_url = match issue_url(event) {
            Some(url) if !url.is_empty() => url,
            _ => {
                info!("no issue URL found in the payload");
                return Ok(RelayOutcome::NoIssueUrl);
            }
        };

        let slack_url = match self.slack_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => {
                error!("{} is not set", SLACK_URL_VAR);
                return Ok(RelayOutcome::NotConfigured);
            }
        };

        let message = SlackMessage::issue_created(issue_url);
        match post_message(&self.client, slack_url, &message).await? {
            Delivery::Accepted => {
                info!("message sent to Slack successfully");
                Ok(RelayOutcome::Sent)
            }
            Delivery::Rejected { status, body } => {
                error!(
                    "failed to send message to Slack, status: {}, response: {}",
                    status, body
                );
                Ok(RelayOutcome::Rejected {
                    status: status.as_u16(),
                })
            }
        }
    }
}
