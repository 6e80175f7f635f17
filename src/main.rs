use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use congruent::{Check, Dispatcher, DispatcherConfig, JobConfig, Responses};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CheckKind {
    /// All status codes are the same
    Status,
    /// All headers are the same
    Headers,
    /// All bodies are byte-identical
    Body,
    /// All bodies hold the same JSON document
    Content,
}

impl CheckKind {
    fn check(self) -> Check {
        match self {
            CheckKind::Status => Check::StatusSame,
            CheckKind::Headers => Check::HeaderSame,
            CheckKind::Body => Check::BodySame,
            CheckKind::Content => Check::BodyContentSame,
        }
    }
}

/// Send the same requests to several servers and compare the responses.
#[derive(Debug, Parser)]
#[command(name = "congruent", version)]
struct Cli {
    /// Job files to run
    #[arg(required = true)]
    configs: Vec<PathBuf>,

    /// Check to run on the responses of every request (repeatable)
    #[arg(long = "check", value_enum)]
    checks: Vec<CheckKind>,

    /// Number of body bytes shown in mismatch messages
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_diff: Option<u64>,

    /// User-Agent sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let dispatcher = match build_dispatcher(&cli) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let checks: Vec<Check> = cli.checks.iter().map(|c| c.check()).collect();
    let max_diff = cli.max_diff.map(|n| n as usize);

    let mut failed = false;
    for path in &cli.configs {
        match run_job(&dispatcher, path, &checks, max_diff).await {
            Ok(passed) => failed |= !passed,
            Err(e) => {
                eprintln!("{}: {e:#}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn build_dispatcher(cli: &Cli) -> anyhow::Result<Dispatcher> {
    let mut builder = DispatcherConfig::builder();
    if let Some(ua) = &cli.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    let config = builder.build().context("invalid dispatcher configuration")?;

    Ok(Dispatcher::new(Some(config))?)
}

/// Runs every request of one job file. Returns `Ok(false)` if any dispatch
/// or check failed; those failures are printed and the job carries on.
async fn run_job(
    dispatcher: &Dispatcher,
    path: &Path,
    checks: &[Check],
    max_diff: Option<usize>,
) -> anyhow::Result<bool> {
    let job = JobConfig::from_path(path)?;
    let servers = job.servers().context("cannot resolve servers")?;
    let requests = job.requests().context("cannot resolve requests")?;

    log::info!(
        "{}: {} requests against {} servers",
        path.display(),
        requests.len(),
        servers.len()
    );

    let mut passed = true;
    for request in &requests {
        let responses = match dispatcher.dispatch(&servers, request).await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("({}){}: {e}", request.method(), request.path());
                passed = false;
                continue;
            }
        };
        let responses = match max_diff {
            Some(n) => responses.with_diff_length(n),
            None => responses,
        };

        print_responses(&responses);

        for failure in responses.check_all(checks) {
            eprintln!("{failure}");
            passed = false;
        }
    }

    Ok(passed)
}

fn print_responses(responses: &Responses) {
    for resp in responses {
        let request = resp
            .request
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{request}: {}", resp.status);
        println!("{}", String::from_utf8_lossy(&resp.body));
    }
}
