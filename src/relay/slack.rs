use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::trace;
use url::Url;

use crate::relay::RelayError;

const ISSUE_CREATED: &str = "New GitHub Issue Created: ";

/// Body of a Slack incoming-webhook message.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    pub text: String,
}

impl SlackMessage {
    pub fn issue_created(issue_url: &str) -> Self {
        Self {
            text: format!("{}{}", ISSUE_CREATED, issue_url),
        }
    }
}

/// What Slack made of a message we managed to deliver.
#[derive(Debug)]
pub enum Delivery {
    Accepted,
    Rejected { status: StatusCode, body: String },
}

/// Posts `message` as JSON to the incoming webhook at `destination`.
///
/// A non-2xx answer is not an error here: the caller gets the status and the body Slack sent
/// back. Errors are reserved for requests that couldn't be made at all.
pub async fn post_message(
    client: &Client,
    destination: &str,
    message: &SlackMessage,
) -> Result<Delivery, RelayError> {
    let url = Url::parse(destination)?;

    // the path of an incoming webhook is its secret, only log the host
    trace!(
        "posting `{}` to {}",
        message.text,
        url.host_str().unwrap_or_default()
    );
    let response = client
        .post(url)
        .json(message)
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;

    let status = response.status();
    if status.is_success() {
        return Ok(Delivery::Accepted);
    }

    let body = response.text().await.map_err(reqwest::Error::without_url)?;
    Ok(Delivery::Rejected { status, body })
}
