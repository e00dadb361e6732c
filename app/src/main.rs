//! `meals`: fetch the meal collection once and print what the viewer shows.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use meals_app::{render, Cli, Config, MealsSession, ReqwestTransport};
use meals_core::{select_view, MealsClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = Config::load(Cli::parse()).context("loading configuration")?;

    // Logs go to stderr so stdout carries only the view.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("meals v{}", env!("CARGO_PKG_VERSION"));

    let transport = ReqwestTransport::new().context("building HTTP transport")?;
    let session = MealsSession::mount(MealsClient::new(&config.url), Arc::new(transport));

    let settled = tokio::select! {
        state = session.settled() => Some(state),
        _ = tokio::signal::ctrl_c() => None,
    };
    session.unmount().await;

    let Some(state) = settled else {
        tracing::info!("interrupted before the fetch settled");
        return Ok(ExitCode::from(130));
    };

    let rendered = render(&select_view(&state), config.json).context("encoding view")?;
    println!("{}", rendered.output);
    Ok(ExitCode::from(rendered.exit_code))
}
