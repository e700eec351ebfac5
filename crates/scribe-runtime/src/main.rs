//! scribe-monitor - Replay a digitizer capture through the kinematic pipeline
//!
//! Usage: scribe-monitor [--config FILE] [--json] [--once] CAPTURE

use std::io::IsTerminal;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use scribe_runtime::{Display, DisplayMode, Monitor, ScribeConfig, StopReason};
use scribe_transport::ReplaySource;

const USAGE: &str = "Usage: scribe-monitor [--config FILE] [--json] [--once] CAPTURE";

#[derive(Error, Debug)]
enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Missing capture file")]
    MissingCapture,

    #[error("Unexpected argument: {0}")]
    Unexpected(String),
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    capture: PathBuf,
    json: bool,
    once: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Args::default();
        let mut capture = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or(ArgsError::MissingValue("--config"))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--json" => parsed.json = true,
                "--once" => parsed.once = true,
                s if s.starts_with('-') => return Err(ArgsError::UnknownOption(arg)),
                _ if capture.is_none() => capture = Some(PathBuf::from(arg)),
                _ => return Err(ArgsError::Unexpected(arg)),
            }
        }

        parsed.capture = capture.ok_or(ArgsError::MissingCapture)?;
        Ok(parsed)
    }
}

async fn run(args: Args) -> Result<StopReason, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => ScribeConfig::load(path)?,
        None => ScribeConfig::default(),
    };

    let source = ReplaySource::open(&args.capture)?;
    let mut monitor = Monitor::new(source, &config.arm(), config.monitor.clone())?;

    let mode = if args.json {
        DisplayMode::JsonLines
    } else if std::io::stdout().is_terminal() {
        DisplayMode::Terminal
    } else {
        DisplayMode::Plain
    };
    let mut display = Display::stdout(mode);
    let once = args.once;

    let reason = monitor
        .run(|sample| {
            display.show(sample)?;
            Ok(if once {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        })
        .await?;

    Ok(reason)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(StopReason::Interrupted) => {
            println!("\nStopping data capture.");
            ExitCode::SUCCESS
        }
        Ok(StopReason::TooManyFailures) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_full() {
        let args = parse(&["--config", "arm.toml", "--json", "--once", "run.capture"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("arm.toml")));
        assert_eq!(args.capture, PathBuf::from("run.capture"));
        assert!(args.json);
        assert!(args.once);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(&[]), Err(ArgsError::MissingCapture)));
        assert!(matches!(
            parse(&["--config"]),
            Err(ArgsError::MissingValue("--config"))
        ));
        assert!(matches!(
            parse(&["--verbose", "x"]),
            Err(ArgsError::UnknownOption(_))
        ));
        assert!(matches!(
            parse(&["a.capture", "b.capture"]),
            Err(ArgsError::Unexpected(_))
        ));
    }
}
