//! Argument parsing and story dispatch.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bloom_client::config::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, ENV_API_TOKEN, ENV_API_URL, ENV_HTTP_TIMEOUT_SECS,
};
use bloom_client::{ClientConfig, HttpBloomClient};
use bloom_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, TelemetryError, init_logging};
use bloom_ui::system_clock;
use clap::{Parser, ValueEnum};
use tracing::info;

use crate::output::{OutputFormat, StoryReport, render_reports};
use crate::scenarios::{Scenario, Stage, play};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Backend {
    /// Seeded in-memory services.
    #[default]
    Mock,
    /// The HTTP API; read-only.
    Live,
}

#[derive(Debug, Parser)]
#[command(
    name = "bloom-stories",
    version,
    about = "Play the Bloom tool stories and print the resulting state"
)]
pub(crate) struct Cli {
    #[arg(
        long = "scenario",
        value_enum,
        help = "Story to play (repeatable); every story when omitted"
    )]
    scenarios: Vec<Scenario>,
    #[arg(long, value_enum, default_value_t = Backend::Mock)]
    backend: Backend,
    #[arg(long, env = ENV_API_URL, default_value = DEFAULT_API_URL)]
    api_url: String,
    #[arg(long, env = ENV_API_TOKEN, hide_env_values = true)]
    api_token: Option<String>,
    #[arg(
        long,
        env = ENV_HTTP_TIMEOUT_SECS,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        value_enum,
        default_value_t = OutputFormat::Table
    )]
    output: OutputFormat,
    #[arg(long, default_value = "auto", value_parser = parse_log_format)]
    log_format: LogFormat,
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn parse_log_format(value: &str) -> Result<LogFormat, TelemetryError> {
    value.parse()
}

/// Parse arguments, play the selected stories, and print their reports.
///
/// # Errors
///
/// Returns an error when logging cannot be installed, the live client cannot
/// be configured, or the reports cannot be rendered.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
        ..LoggingConfig::default()
    })
    .context("failed to initialise logging")?;

    let reports = play_all(&cli).await?;
    render_reports(&reports, cli.output)
}

pub(crate) async fn play_all(cli: &Cli) -> anyhow::Result<Vec<StoryReport>> {
    let scenarios = if cli.scenarios.is_empty() {
        Scenario::value_variants().to_vec()
    } else {
        cli.scenarios.clone()
    };
    let live = match cli.backend {
        Backend::Mock => None,
        Backend::Live => Some(Arc::new(build_client(cli)?)),
    };

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let stage = live.as_ref().map_or_else(
            || Stage::seeded(scenario),
            |client| Stage::live(Arc::clone(client), system_clock()),
        );
        reports.push(play(scenario, &stage).await);
    }
    Ok(reports)
}

fn build_client(cli: &Cli) -> anyhow::Result<HttpBloomClient> {
    let mut config = ClientConfig::new(&cli.api_url)
        .context("invalid API URL")?
        .with_timeout(Duration::from_secs(cli.timeout));
    if let Some(token) = &cli.api_token {
        config = config.with_token(token.clone());
    }
    let client = HttpBloomClient::new(&config).context("failed to build HTTP client")?;
    info!(
        base_url = %config.base_url,
        request_id = client.request_id(),
        "playing stories against the live API"
    );
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bloom-stories").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scenarios_are_repeatable() {
        let cli = parse(&[
            "--scenario",
            "bmi-saved",
            "--scenario",
            "journal-search",
            "--output",
            "json",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.scenarios, vec![Scenario::BmiSaved, Scenario::JournalSearch]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.backend, Backend::Mock);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for args in [
            ["--log-format", "xml"],
            ["--timeout", "0"],
            ["--scenario", "bmi-unknown"],
        ] {
            let result =
                Cli::try_parse_from(std::iter::once("bloom-stories").chain(args.iter().copied()));
            assert!(result.is_err(), "{args:?} should be rejected");
        }
    }

    #[tokio::test]
    async fn every_story_plays_against_mocks() {
        let reports = play_all(&parse(&[])).await.expect("reports");
        assert_eq!(reports.len(), Scenario::value_variants().len());
        assert!(
            reports
                .iter()
                .all(|report| report.facts.first().is_some_and(|fact| fact.value == "mock"))
        );
    }

    #[tokio::test]
    async fn live_backend_requires_a_valid_url() {
        let cli = parse(&["--backend", "live", "--api-url", "not a url"]);
        let err = play_all(&cli).await.expect_err("bad url");
        assert_eq!(err.to_string(), "invalid API URL");
    }
}
