// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Houghline: detect the strongest straight lines in an image.
//
// Entry point. Initialises logging, merges the config file with command-line
// flags, runs the pipeline and maps failures to an exit code.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use houghline_core::config::{Backdrop, ComputeKind, HoughConfig};
use houghline_core::error::Result;
use houghline_core::human_errors::humanize_error;

#[derive(Debug, Parser)]
#[command(name = "houghline")]
#[command(about = "Find the strongest straight lines in an image and draw them in green")]
#[command(version)]
struct Cli {
    /// Image to analyse (PNG, JPEG, ...). Defaults to input.png.
    input: Option<PathBuf>,

    /// Where to write the annotated PNG. Defaults to out.png.
    output: Option<PathBuf>,

    /// JSON config file; flags given here override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of lines to extract.
    #[arg(long = "lines")]
    line_count: Option<usize>,

    /// Distance step of the accumulator, in pixels.
    #[arg(long)]
    r_step: Option<f64>,

    /// Angle step of the accumulator, in radians.
    #[arg(long)]
    phi_step: Option<f64>,

    /// Compute backend running the kernels.
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// What the lines are drawn over.
    #[arg(long, value_enum)]
    backdrop: Option<BackdropArg>,

    /// Minimum Sobel magnitude counted as an edge.
    #[arg(long)]
    edge_threshold: Option<u16>,

    /// Print a JSON run report to stdout.
    #[arg(long)]
    report: bool,

    /// Write the effective configuration to this file before running.
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Host,
    Accelerator,
}

impl From<BackendArg> for ComputeKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Host => ComputeKind::Host,
            BackendArg::Accelerator => ComputeKind::Accelerator,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackdropArg {
    Edges,
    Original,
}

impl From<BackdropArg> for Backdrop {
    fn from(arg: BackdropArg) -> Self {
        match arg {
            BackdropArg::Edges => Backdrop::Edges,
            BackdropArg::Original => Backdrop::Original,
        }
    }
}

impl Cli {
    /// Start from the config file (or defaults) and overlay every flag given.
    fn resolve_config(&self) -> Result<HoughConfig> {
        let mut config = match &self.config {
            Some(path) => HoughConfig::load(path)?,
            None => HoughConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(line_count) = self.line_count {
            config.line_count = line_count;
        }
        if let Some(r_step) = self.r_step {
            config.r_step = r_step;
        }
        if let Some(phi_step) = self.phi_step {
            config.phi_step = phi_step;
        }
        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
        if let Some(backdrop) = self.backdrop {
            config.backdrop = backdrop.into();
        }
        if let Some(threshold) = self.edge_threshold {
            config.edge_threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = execute(&cli) {
        let human = humanize_error(&err);
        tracing::error!(error = %err, "houghline failed");
        eprintln!("error: {human}");
        std::process::exit(human.exit_code());
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    if let Some(path) = &cli.save_config {
        config.save(path)?;
        tracing::info!(path = %path.display(), "Configuration saved");
    }

    tracing::info!(
        input = %config.input.display(),
        lines = config.line_count,
        "Houghline starting"
    );
    let report = houghline_engine::run(&config)?;

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use houghline_core::error::HoughError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("houghline").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let config = parse(&[]).resolve_config().unwrap();
        assert_eq!(config, HoughConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "photo.jpg",
            "lines.png",
            "--lines",
            "12",
            "--r-step",
            "2",
            "--backdrop",
            "original",
            "--backend",
            "accelerator",
        ])
        .resolve_config()
        .unwrap();
        assert_eq!(config.input, PathBuf::from("photo.jpg"));
        assert_eq!(config.output, PathBuf::from("lines.png"));
        assert_eq!(config.line_count, 12);
        assert_eq!(config.r_step, 2.0);
        assert_eq!(config.backdrop, Backdrop::Original);
        assert_eq!(config.backend, ComputeKind::Accelerator);
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("houghline.json");
        std::fs::write(&path, r#"{ "line_count": 7, "phi_step": 0.05 }"#).unwrap();

        let config = parse(&["--config", path.to_str().unwrap(), "--lines", "3"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.line_count, 3);
        assert_eq!(config.phi_step, 0.05);
    }

    #[test]
    fn invalid_step_is_a_config_error() {
        let err = parse(&["--phi-step", "0"]).resolve_config().unwrap_err();
        assert!(matches!(err, HoughError::Config(_)));
        assert_eq!(humanize_error(&err).exit_code(), 2);
    }

    #[test]
    fn unknown_backend_is_rejected_by_clap() {
        let result = Cli::try_parse_from(["houghline", "--backend", "gpu"]);
        assert!(result.is_err());
    }
}
