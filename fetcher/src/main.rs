use anyhow::Context;
use cdmcore::client::SpaceTrackClient;
use cdmcore::AlertError;
use chrono::Utc;
use clap::Parser;
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use workflow::config::RunConfig;
use workflow::credentials::resolve_credentials;
use workflow::runner::Runner;

mod report;
mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Report upcoming conjunctions published by Space-Track",
    after_help = "Credentials may also come from SPACETRACK_USER and SPACETRACK_PASSWORD."
)]
struct Args {
    /// Space-Track user name
    #[arg(short = 'u', long = "user")]
    user: Option<String>,
    /// Space-Track password
    #[arg(short = 'p', long)]
    password: Option<String>,
    /// Load run settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Provider base URL
    #[arg(long)]
    base_url: Option<String>,
    /// Report valid records and list invalid ones instead of failing the run
    #[arg(long, default_value_t = false)]
    lenient: bool,
    /// Print the decoded records as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Catalog number of the object of interest (not yet used to filter)
    object_id: u32,
}

/// Tags a pipeline error with the stage it came from.
fn stage_failure(err: AlertError) -> anyhow::Error {
    let stage = err.stage();
    anyhow::Error::new(err).context(format!("{} failed", stage))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    }
    .with_overrides(args.base_url.clone(), args.lenient);

    warn!(
        "object id {} is accepted but not applied to the conjunction query",
        args.object_id
    );

    let credentials = resolve_credentials(args.user.clone(), args.password.clone(), |key| {
        std::env::var(key).ok()
    })
    .map_err(stage_failure)?;

    let runner = Runner::new(&config);
    let client = SpaceTrackClient::with_timeout(runner.queries(), credentials, config.timeout())
        .map_err(stage_failure)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.json {
        report::render_banner(&mut out).context("writing report")?;
        out.flush().context("writing report")?;
    }

    let result = runner
        .execute(&client, Utc::now())
        .map_err(stage_failure)?;
    info!(
        "fetched {} bytes, {} of {} records accepted",
        result.metrics.bytes_fetched, result.metrics.accepted, result.metrics.received
    );

    if args.json {
        for rejection in &result.outcome.rejected {
            warn!("rejected {}", rejection);
        }
        report::render_json(&mut out, &result.outcome).context("writing report")?;
    } else {
        report::render_console(&mut out, &result.outcome).context("writing report")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn object_id_is_required() {
        assert!(Args::try_parse_from(["conjunction-alerts", "-u", "me"]).is_err());
        let args = Args::try_parse_from(["conjunction-alerts", "-u", "me", "-p", "pw", "25544"])
            .unwrap();
        assert_eq!(args.object_id, 25544);
        assert_eq!(args.user.as_deref(), Some("me"));
        assert!(!args.lenient);
    }

    #[test]
    fn stage_is_named_in_failure_message() {
        let err = stage_failure(AlertError::Configuration("missing user".into()));
        assert_eq!(err.to_string(), "credential resolution failed");
        assert_eq!(
            err.root_cause().to_string(),
            "configuration error: missing user"
        );
    }
}
