// src/main.rs
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use cardiofusion::pacer::{Pacemaker, PacerEvent, PacingMode, Vitals};
use cardiofusion::ppg::{
    render_trace_png, Estimate, EstimatorConfig, FrameClock, PlotStyle, PpgEstimator,
    PpgPipeline, SampleSource, SyntheticPulse, TextSource,
};
#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    Vvi,
    Odo,
}
impl From<ModeArg> for PacingMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Vvi => PacingMode::Vvi,
            ModeArg::Odo => PacingMode::Odo,
        }
    }
}
/// Estimate heart rate from a stream of per-frame brightness samples.
#[derive(Parser, Debug)]
#[command(name = "cardiofusion", version)]
struct Cli {
    /// Text file with one sample per line (`-` for stdin)
    #[arg(long, conflicts_with = "synthetic_bpm")]
    input: Option<PathBuf>,
    /// Generate a synthetic pulse at this rate instead of reading input
    #[arg(long)]
    synthetic_bpm: Option<f32>,
    /// Length of the synthetic recording
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,
    /// Peak-to-peak uniform noise added to the synthetic pulse
    #[arg(long, default_value_t = 0.0)]
    noise: f32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Estimator configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured frame rate
    #[arg(long)]
    frame_rate: Option<f32>,
    /// Write the final detrended window as a PNG
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Feed estimates into the pacemaker simulator and print its events
    #[arg(long)]
    pace: bool,
    #[arg(long, value_enum, default_value_t = ModeArg::Vvi)]
    mode: ModeArg,
    /// Pacemaker lower rate limit (ppm)
    #[arg(long, default_value_t = 60)]
    lrl: u32,
}
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Line<'a> {
    HrUpdate {
        t_ms: f64,
        #[serde(flatten)]
        estimate: &'a Estimate,
    },
    Vitals {
        t_ms: f64,
        #[serde(flatten)]
        vitals: &'a Vitals,
    },
}
fn load_config(cli: &Cli) -> Result<EstimatorConfig> {
    let mut config = match &cli.config {
        Some(path) => EstimatorConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EstimatorConfig::default(),
    };
    if let Some(rate) = cli.frame_rate {
        config.frame_rate = rate;
    }
    config.validate().context("invalid estimator configuration")?;
    Ok(config)
}
fn open_source(cli: &Cli, config: &EstimatorConfig) -> Result<Box<dyn SampleSource>> {
    match (&cli.input, cli.synthetic_bpm) {
        (Some(path), _) if path.as_os_str() == "-" => {
            Ok(Box::new(TextSource::new(io::stdin().lock())))
        }
        (Some(path), _) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(TextSource::new(BufReader::new(file))))
        }
        (None, Some(bpm)) => Ok(Box::new(
            SyntheticPulse::new(config.frame_rate, bpm, cli.seed)
                .noise(cli.noise)
                .drift(0.2)
                .duration(cli.seconds),
        )),
        (None, None) => bail!("either --input or --synthetic-bpm is required"),
    }
}
/// The simulator only exists with `--pace`; its parameters are not checked otherwise.
fn build_pacer(cli: &Cli) -> Result<Option<Pacemaker>> {
    if !cli.pace {
        return Ok(None);
    }
    let mut pacer = Pacemaker::new();
    pacer
        .set_params(cli.mode.into(), cli.lrl)
        .context("invalid pacemaker parameters")?;
    Ok(Some(pacer))
}
fn emit(out: &mut impl Write, line: &Line) -> Result<()> {
    serde_json::to_writer(&mut *out, line)?;
    writeln!(out).context("writing output")?;
    Ok(())
}
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    log::info!(
        "estimator: {} fps, window {} samples, refractory {:.1} samples",
        config.frame_rate,
        config.buffer_capacity(),
        config.refractory_samples()
    );
    let source = open_source(&cli, &config)?;
    let clock = FrameClock::new(config.frame_rate);
    let estimator = PpgEstimator::with_clock(config, clock)?;
    let mut pacer = build_pacer(&cli)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut pipeline = PpgPipeline::new(source, estimator);
    let mut processed = 0usize;
    while let Some(outcome) = pipeline.pump_once()? {
        processed += 1;
        let t_ms = outcome.timestamp_ms;
        if let Some(estimate) = &outcome.estimate {
            emit(&mut out, &Line::HrUpdate { t_ms, estimate })?;
            if let Some(pacer) = pacer.as_mut() {
                pacer.set_patient_hr(estimate.heart_rate);
            }
        }
        if let Some(pacer) = pacer.as_mut() {
            let vitals = pacer.update(t_ms);
            if vitals.event != PacerEvent::None {
                emit(&mut out, &Line::Vitals { t_ms, vitals: &vitals })?;
            }
        }
    }
    out.flush()?;
    log::info!("processed {processed} samples ({} skipped)", pipeline.skipped());
    let estimator = pipeline.estimator();
    match estimator.current_estimate() {
        Some(e) => log::info!("final estimate {:.1} BPM (quality {:.2})", e.heart_rate, e.quality),
        None => log::warn!("no heart rate could be estimated"),
    }
    if let Some(path) = &cli.plot {
        let png = render_trace_png(&pipeline.latest_trace(), PlotStyle::default())?;
        std::fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
        log::info!("trace written to {}", path.display());
    }
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cardiofusion").chain(args.iter().copied())).unwrap()
    }
    #[test]
    fn pacer_params_ignored_without_pace() {
        let cli = parse(&["--synthetic-bpm", "72", "--lrl", "0"]);
        assert!(build_pacer(&cli).unwrap().is_none());
    }
    #[test]
    fn pacer_params_checked_with_pace() {
        let cli = parse(&["--synthetic-bpm", "72", "--pace", "--lrl", "0"]);
        assert!(build_pacer(&cli).is_err());
        let cli = parse(&["--synthetic-bpm", "72", "--pace", "--mode", "odo", "--lrl", "50"]);
        let pacer = build_pacer(&cli).unwrap().unwrap();
        assert_eq!(pacer.lrl(), 50);
    }
}
