//! `hostel-admin` entry-point: loads settings, restores the session and runs
//! one console command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use hostel_frontend::config::LogFormat;
use hostel_frontend::inbound::cli::{self, CliArgs};
use hostel_frontend::{ClientSettings, FrontendState};

const DEFAULT_FILTER: &str = "warn,hostel_admin::notify=info";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    // Settings come from configuration files and `HOSTEL_*` only.
    let settings = ClientSettings::load_from_iter([OsString::from("hostel-admin")])
        .map_err(|err| eyre!("loading configuration: {err}"))?;
    init_tracing(settings.log_format().unwrap_or_else(|err| {
        eprintln!("{err}; falling back to compact logs");
        LogFormat::Compact
    }));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(settings, args))
}

async fn async_main(settings: ClientSettings, args: CliArgs) -> Result<()> {
    let state = FrontendState::connect(&settings).wrap_err("starting hostel-admin")?;
    let output = cli::run(&state, args.command).await?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
