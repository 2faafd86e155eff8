//! `amberlink` command-line entry point.

use amberlink::config::DriverConfig;
use amberlink::errors::DriverError;
use amberlink::events::LoggingEventSink;
use amberlink::observability::init_tracing;
use amberlink::process::SystemProcessRunner;
use amberlink::router::Router;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => exit_code(code),
        Err(err) => {
            report(&err);
            let code = err
                .downcast_ref::<DriverError>()
                .map_or(1, DriverError::exit_code);
            exit_code(code)
        }
    }
}

async fn run() -> anyhow::Result<i32> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = DriverConfig::from_env()?;
    tracing::debug!(root = %config.root().display(), "Loaded configuration");

    let router = Router::new(config, Arc::new(SystemProcessRunner::new()))
        .with_profile_override(DriverConfig::profile_override_from_env())
        .with_event_sink(Arc::new(LoggingEventSink::debug()));
    let mut stdout = std::io::stdout().lock();
    let code = router.dispatch(&args, &mut stdout).await?;
    Ok(code)
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<DriverError>() {
        // The pipeline already printed which stage and step failed.
        Some(DriverError::StageFailure { .. }) => {}
        Some(driver_err) => {
            eprintln!("error: {driver_err}");
            if let Some(hint) = driver_err.fix_hint() {
                eprintln!("hint: {hint}");
            }
        }
        None => eprintln!("error: {err:#}"),
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
