use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;

/// Name of the environment variable holding the Slack incoming-webhook URL.
pub const SLACK_URL_VAR: &str = "SLACK_URL";

#[derive(Clone, Debug, Deserialize)]
pub struct RelayConfig {
    /// The Slack incoming-webhook URL notifications are posted to. Left unset, every
    /// invocation with an issue URL reports a configuration error instead of posting.
    #[serde(default)]
    pub slack_url: Option<String>,
    /// How long to wait for Slack to answer before giving up on the request
    #[serde(default = "defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            slack_url: None,
            request_timeout_secs: defaults::request_timeout_secs(),
        }
    }
}

impl RelayConfig {
    /// Reads the YAML configuration at `path`, or falls back to the defaults when no file was
    /// given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        let config_file = File::open(path)
            .with_context(|| format!("couldn't open {}:", path.display()))?;
        let config: Self = serde_yaml::from_reader(BufReader::new(config_file))
            .context("couldn't parse config file")?;
        config.validate()
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1 second");
        }
        Ok(self)
    }

    /// Replaces the configured Slack URL, if `slack_url` is set. Used to let the command line
    /// and the environment take precedence over the file.
    pub fn with_slack_url(mut self, slack_url: Option<String>) -> Self {
        if slack_url.is_some() {
            self.slack_url = slack_url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

mod defaults {
    pub fn request_timeout_secs() -> u64 {
        30
    }
}
