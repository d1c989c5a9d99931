mod adapters;
mod engine;
mod error;
mod models;

use std::io::IsTerminal;

use adapters::{cli, output, validator};
use engine::{converter, runner};
use error::{ConvertError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        if let ConvertError::Usage(e) = &err {
            e.exit();
        }

        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

async fn run() -> Result<()> {
    let config = cli::resolve(std::env::args_os())?;

    validator::validate(&config.file_path)?;

    let output_path = output::derive_output_path(&config.file_path);
    info!(
        input = %config.file_path.display(),
        output = %output_path.display(),
        separator = %config.separator,
        "Converting"
    );

    let (record_tx, pending) = runner::setup_sink(&output_path, config.pretty)?;

    match converter::convert(&config, record_tx).await {
        Ok(_) => {
            pending.commit().await?;
            Ok(())
        }
        Err(e) => {
            let sink_error = pending.discard().await;
            match e {
                // The sink's own error explains why it stopped receiving
                ConvertError::SinkClosed => Err(sink_error.unwrap_or(e)),
                e => Err(e),
            }
        }
    }
}
