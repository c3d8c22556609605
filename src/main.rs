use std::fmt::Debug;
use std::fmt::Display;

use second_chance::configuration::get_configuration;
use second_chance::rate_limit::init_purge_worker;
use second_chance::startup::Application;
use second_chance::telemetry::get_subscriber;
use second_chance::telemetry::init_subscriber;
use tokio::task::JoinError;

fn report_exit(
    name: &str,
    outcome: Result<Result<(), impl Debug + Display>, JoinError>,
) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{name} exited gracefully")
        }

        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain=?e,
                error.message=%e,
                "{name} failed (inner)"
            )
        }

        Err(e) => {
            tracing::error!(
                error.cause_chain=?e,
                error.message=%e,
                "{name} failed (outer)"
            )
        }
    }
}

/// Initialise telemetry, load config, and start the server
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("second-chance", "info", std::io::stdout);
    init_subscriber(subscriber);

    let cfg = get_configuration()?;

    let app = Application::build(cfg).await?;
    tracing::info!(port = app.port(), "listening");
    let purge_worker = init_purge_worker(app.rate_limiter());

    // spawned so that each branch runs in parallel, not just concurrently
    let server_thread = tokio::spawn(app.run_until_stopped());
    let purge_worker_thread = tokio::spawn(purge_worker);

    // returns when the first branch completes, cancelling the other
    tokio::select! {
        o = server_thread => { report_exit("API", o) },
        o = purge_worker_thread => { report_exit("Rate limit purge worker", o) },
    }

    Ok(())
}
