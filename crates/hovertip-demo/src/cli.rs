#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hovertip_core::logging::{LogFormat, init_logging};
use hovertip_harness::write_jsonl;
use hovertip_runtime::{MeasurementTiming, RuntimeConfig};

use crate::error::{DemoError, Result};
use crate::page::{DEMO_VIEWPORT, PageRun, run_page};

/// Render latency applied when neither `--latency-ms` nor a config file sets one.
pub const DEFAULT_DEMO_LATENCY_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimingArg {
    /// Both buttons measure after paint.
    PostPaint,
    /// Both buttons measure before paint.
    PrePaint,
    /// Left button post-paint, right button pre-paint.
    Both,
}

impl TimingArg {
    #[must_use]
    pub fn timings(self) -> [MeasurementTiming; 2] {
        match self {
            Self::PostPaint => [MeasurementTiming::PostPaint; 2],
            Self::PrePaint => [MeasurementTiming::PrePaint; 2],
            Self::Both => [MeasurementTiming::PostPaint, MeasurementTiming::PrePaint],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "hovertip-demo",
    about = "Compare post-paint and pre-paint tooltip measurement frame by frame",
    version
)]
pub struct Cli {
    /// Which measurement timing the two buttons use.
    #[arg(long, value_enum, default_value_t = TimingArg::Both)]
    pub timing: TimingArg,

    /// Busy-wait per tooltip render pass, in milliseconds.
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Runtime config file (TOML, or JSON by extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit painted frames as JSON lines instead of text.
    #[arg(long)]
    pub json: bool,

    /// Pixels per character cell in text output.
    #[arg(long, default_value_t = 8)]
    pub cell_width: i32,

    /// Pixels per character row in text output.
    #[arg(long, default_value_t = 8)]
    pub cell_height: i32,

    /// Exit non-zero if any tooltip jumped between frames.
    #[arg(long)]
    pub fail_on_flicker: bool,

    /// Log format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format.into(), cli.verbose);
    let stdout = io::stdout();
    run(&cli, &mut stdout.lock())
}

/// Build the runtime config from the file (if any) and flag overrides.
pub fn resolve_config(cli: &Cli) -> Result<RuntimeConfig> {
    let config = match &cli.config {
        Some(path) => RuntimeConfig::from_file(path)?,
        None => RuntimeConfig {
            render_latency_ms: DEFAULT_DEMO_LATENCY_MS,
            viewport: DEMO_VIEWPORT,
            ..RuntimeConfig::default()
        },
    };
    let config = match cli.latency_ms {
        Some(ms) => RuntimeConfig {
            render_latency_ms: ms,
            ..config
        },
        None => config,
    };
    Ok(config.validated()?)
}

pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(cli)?;
    let page = run_page(&config, cli.timing.timings());

    if cli.json {
        write_json(out, &page)?;
    } else {
        write_text(out, &page, &config, cli.cell_width, cli.cell_height)?;
    }

    if cli.fail_on_flicker && !page.flicker.is_clean() {
        return Err(DemoError::FlickerDetected {
            jumps: page.flicker.jumps.len(),
        });
    }
    Ok(())
}

fn write_json(out: &mut dyn Write, page: &PageRun) -> io::Result<()> {
    let mut buf = Vec::new();
    write_jsonl(&mut buf, &page.title, &page.frames)?;
    out.write_all(&buf)?;
    let summary = serde_json::json!({
        "run": page.title,
        "flicker": page.flicker,
    });
    writeln!(out, "{summary}")
}

fn write_text(
    out: &mut dyn Write,
    page: &PageRun,
    config: &RuntimeConfig,
    cell_width: i32,
    cell_height: i32,
) -> io::Result<()> {
    writeln!(
        out,
        "hovertip demo: {} latency={}ms",
        page.title, config.render_latency_ms
    )?;
    for frame in page.frames.frames() {
        writeln!(
            out,
            "-- frame {} @ {:.1}ms --",
            frame.index,
            frame.painted_at.as_secs_f64() * 1000.0
        )?;
        out.write_all(frame.render_text(cell_width, cell_height).as_bytes())?;
    }
    writeln!(out, "flicker: {}", page.flicker.summary())?;
    for jump in &page.flicker.jumps {
        writeln!(out, "  {jump}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["hovertip-demo"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.timing, TimingArg::Both);
        assert_eq!(cli.latency_ms, None);
        assert!(!cli.json);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.render_latency_ms, DEFAULT_DEMO_LATENCY_MS);
        assert_eq!(config.viewport, DEMO_VIEWPORT);
    }

    #[test]
    fn timing_values_are_kebab_case() {
        assert_eq!(cli(&["--timing", "post-paint"]).timing, TimingArg::PostPaint);
        assert_eq!(cli(&["--timing", "pre-paint"]).timing, TimingArg::PrePaint);
        assert!(Cli::try_parse_from(["hovertip-demo", "--timing", "later"]).is_err());
    }

    #[test]
    fn latency_flag_overrides() {
        let config = resolve_config(&cli(&["--latency-ms", "0"])).unwrap();
        assert_eq!(config.render_latency_ms, 0);
    }

    #[test]
    fn text_output_reports_the_post_paint_jump() {
        let mut out = Vec::new();
        run(&cli(&["--latency-ms", "0"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("hovertip demo: left=post-paint right=pre-paint"));
        assert!(text.contains("-- frame 0 @"));
        assert!(text.contains("flicker: FLICKER"));
        assert!(text.contains("This tooltip does not fit"));
    }

    #[test]
    fn json_output_is_one_object_per_line() {
        let mut out = Vec::new();
        run(&cli(&["--latency-ms", "0", "--json", "--timing", "pre-paint"]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let summary = lines.last().unwrap();
        assert_eq!(summary["flicker"]["jumps"].as_array().unwrap().len(), 0);
        assert!(lines[..lines.len() - 1].iter().all(|l| l["checksum"].is_string()));
    }

    #[test]
    fn fail_on_flicker_returns_error() {
        let mut out = Vec::new();
        let err = run(
            &cli(&["--latency-ms", "0", "--timing", "post-paint", "--fail-on-flicker"]),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, DemoError::FlickerDetected { jumps: 2 }));
        assert_eq!(err.exit_code(), 3);
    }
}
