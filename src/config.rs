use crate::chart::{GroupMode, Metric};
use anyhow::{bail, Result};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which presentation of the active dataset is on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Chart,
    Table,
}

impl View {
    pub fn toggle(self) -> Self {
        match self {
            View::Chart => View::Table,
            View::Table => View::Chart,
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(View::Chart),
            "table" => Ok(View::Table),
            other => Err(format!("unknown view '{other}' (expected chart or table)")),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::Chart => "chart",
            View::Table => "table",
        })
    }
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "country-bubbles")]
#[command(about = "Bubble chart and table of countries and regions in the terminal")]
pub struct Args {
    /// Country dataset (JSON array)
    #[arg(short, long, default_value = "data/countries.json")]
    pub data: PathBuf,

    /// Initial grouping: country or region
    #[arg(short, long, default_value = "country")]
    pub group: GroupMode,

    /// Initial metric; defaults to the grouping's first option
    #[arg(short, long)]
    pub metric: Option<String>,

    /// Initial view: chart or table
    #[arg(long, default_value = "chart")]
    pub view: View,

    /// Seed for initial bubble placement
    #[arg(long, default_value_t = 0x5eed)]
    pub seed: u64,

    /// Simulation ticks advanced per frame
    #[arg(long, default_value_t = 2)]
    pub ticks_per_frame: usize,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, default_value = "country-bubbles.log")]
    pub log_file: PathBuf,

    /// Default log level; RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// SVG file written by the export key (default: country-bubbles.svg)
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Settle the chart, write it to the export file and exit without
    /// starting the terminal UI
    #[arg(long)]
    pub headless: bool,
}

/// Validated runtime configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub data_path: PathBuf,
    pub metric: Metric,
    pub view: View,
    pub seed: u64,
    pub ticks_per_frame: usize,
    pub log_file: PathBuf,
    pub log_level: String,
    pub export_path: Option<PathBuf>,
    pub headless: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let metric = match args.metric.as_deref() {
            None => args.group.default_metric(),
            Some(key) => match Metric::parse(args.group, key) {
                Some(metric) => metric,
                None => {
                    let options: Vec<_> = args.group.metrics().iter().map(|m| m.key()).collect();
                    bail!(
                        "metric '{key}' is not available for grouping '{}' (options: {})",
                        args.group,
                        options.join(", ")
                    );
                }
            },
        };

        if args.ticks_per_frame == 0 {
            bail!("--ticks-per-frame must be at least 1");
        }

        Ok(Self {
            data_path: args.data,
            metric,
            view: args.view,
            seed: args.seed,
            ticks_per_frame: args.ticks_per_frame,
            log_file: args.log_file,
            log_level: args.log_level,
            export_path: args.export,
            headless: args.headless,
        })
    }

    /// Where the interactive export key writes
    pub fn export_target(&self) -> PathBuf {
        self.export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("country-bubbles.svg"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/countries.json"),
            metric: GroupMode::Country.default_metric(),
            view: View::Chart,
            seed: 0x5eed,
            ticks_per_frame: 2,
            log_file: PathBuf::from("country-bubbles.log"),
            log_level: "info".to_string(),
            export_path: None,
            headless: false,
        }
    }
}
