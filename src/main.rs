use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rocket::{routes, Build, Rocket};
use tracing::warn;

mod config;
use config::RelayConfig;

mod relay;
use relay::Relay;

mod webhooks;
use webhooks::github_webhook;

#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// Configuration file for issue-relay
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Slack incoming-webhook URL, takes precedence over the configuration file
    #[arg(long, env = config::SLACK_URL_VAR, hide_env_values = true)]
    slack_url: Option<String>,
}

pub(crate) fn build_server(relay: Relay) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![github_webhook])
        .manage(relay)
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    let config = RelayConfig::load(opts.config.as_deref())?.with_slack_url(opts.slack_url);
    if config.slack_url.is_none() {
        warn!("no Slack URL configured, issue events won't be relayed");
    }

    let relay = Relay::new(&config).context("failed to create relay")?;

    build_server(relay)
        .launch()
        .await
        .map(|_| ())
        .map_err(|err| anyhow::anyhow!(err))
}
