use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;

use sales_report::pipeline::{self, InputPaths};
use sales_report::{report, Session};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sales-report: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let session = Session::builder().app_name("sales-report").get_or_create();
    let result = pipeline::run(&session, &InputPaths::default());
    // release the processing context on success and failure alike
    session.stop();
    let report = result.context("computing sales report")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &report).context("writing report")?;
    out.flush().context("writing report")?;
    Ok(())
}

/// Diagnostics go to stderr so the report tables on stdout stay clean.
/// Silent unless RUST_LOG is set.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}
