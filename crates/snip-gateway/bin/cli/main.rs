mod cli;

use crate::cli::{Command, LogFormatArg, CLI};
use anyhow::Context;
use clap::Parser;
use serde_json::{json, Value};
use snip_core::ClickMetadata;
use snip_gateway::{DataDir, Gateway, GatewaySettings};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    debug!(
        data_dir = %config.data_dir.display(),
        base_url = %config.base_url,
        log_format = %config.log_format,
        "starting snip"
    );

    let data_dir = DataDir::open(&config.data_dir, GatewaySettings::default())
        .with_context(|| format!("failed to open {}", config.data_dir.display()))?;

    let output = run(data_dir.gateway(), &config.base_url, config.command).await?;

    data_dir
        .save()
        .await
        .with_context(|| format!("failed to save {}", data_dir.snapshot_path().display()))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Json => builder.json().init(),
        LogFormatArg::Text => builder.init(),
    }
}

async fn run(gateway: &Gateway, base_url: &str, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Shorten {
            url,
            alias,
            ttl_minutes,
        } => {
            let receipt = gateway.shorten(url, alias.as_deref(), ttl_minutes).await?;
            json!({
                "token": receipt.token,
                "short_url": short_url(base_url, receipt.token.as_str()),
                "expires_at": receipt.expires_at,
            })
        }
        Command::Open {
            token,
            referrer,
            user_agent,
        } => {
            let metadata = ClickMetadata {
                referrer,
                location: None,
                user_agent,
            };
            serde_json::to_value(gateway.redirect_target(&token, metadata).await?)?
        }
        Command::Stats { token: Some(token) } => {
            serde_json::to_value(gateway.stats_for(&token).await?)?
        }
        Command::Stats { token: None } => serde_json::to_value(gateway.stats_all().await?)?,
        Command::Remove { token } => {
            gateway.remove_url(&token).await?;
            json!({ "removed": token })
        }
        Command::Clear => serde_json::to_value(gateway.clear_all().await?)?,
        Command::Seed => {
            let created = gateway.seed_sample().await?;
            let links: Vec<String> = created
                .iter()
                .map(|code| short_url(base_url, code.as_str()))
                .collect();
            json!({ "created": created, "short_urls": links })
        }
    };
    Ok(output)
}

fn short_url(base_url: &str, token: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), token)
}
