//! scribe-simulate - Write a simulated sweep capture for scribe-monitor
//!
//! Usage: scribe-simulate OUT [--seed N] [--steps N] [--noise COUNTS] [--malformed-every N]

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use scribe_core::{ArmConfig, JointAngles};
use scribe_test::{record_sweep, ArmSimulator, SimulatorConfig};
use scribe_transport::CaptureWriter;

const USAGE: &str =
    "Usage: scribe-simulate OUT [--seed N] [--steps N] [--noise COUNTS] [--malformed-every N]";

struct Options {
    out: PathBuf,
    seed: u64,
    steps: usize,
    noise: i32,
    malformed_every: usize,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut out = None;
    let mut options = Options {
        out: PathBuf::new(),
        seed: 0,
        steps: 50,
        noise: 0,
        malformed_every: 0,
    };

    while let Some(arg) = args.next() {
        let mut value = |name: &str| -> Result<String, String> {
            args.next().ok_or_else(|| format!("Missing value for {}", name))
        };
        match arg.as_str() {
            "--seed" => options.seed = parse_number(&value("--seed")?)?,
            "--steps" => options.steps = parse_number(&value("--steps")?)?,
            "--noise" => options.noise = parse_number(&value("--noise")?)?,
            "--malformed-every" => {
                options.malformed_every = parse_number(&value("--malformed-every")?)?
            }
            s if s.starts_with('-') => return Err(format!("Unknown option: {}", s)),
            _ if out.is_none() => out = Some(PathBuf::from(arg)),
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
    }

    options.out = out.ok_or_else(|| "Missing output file".to_string())?;
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
    text.parse().map_err(|_| format!("Not a number: {}", text))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let config = SimulatorConfig {
        count_noise: options.noise,
        ..Default::default()
    };
    let mut sim = ArmSimulator::with_seed(ArmConfig::default(), config, options.seed);
    // Reach forward and to the side, probe tilted down
    let pose = JointAngles::from_degrees([60.0, 35.0, -70.0, 0.0, 30.0]);

    let result = CaptureWriter::create(&options.out).and_then(|mut writer| {
        let records = record_sweep(
            &mut sim,
            &mut writer,
            &pose,
            options.steps,
            options.malformed_every,
        )?;
        writer.finish()?;
        Ok(records)
    });

    match result {
        Ok(records) => {
            tracing::info!("Wrote {} records to {}", records, options.out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
