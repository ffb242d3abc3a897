//! cornerhist CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use corner_core::{BinnedHistogram, HistogramDocument, validate_labels};
use corner_viz_render::color::Color;
use corner_viz_render::{HistType, Norm, VizConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cornerhist")]
#[command(about = "cornerhist - corner plots from binned N-D histograms")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a corner plot (format from the output extension: svg, png, pdf)
    Render {
        /// Input histogram document (JSON: shape, counts, edges, labels)
        #[arg(short, long)]
        input: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,

        /// Comma-separated axis labels; overrides labels in the document
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,

        /// Optional YAML style config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Built-in theme (classic, minimal); overrides the config's theme
        #[arg(long)]
        theme: Option<String>,

        /// 1D bar colour (hex or name, e.g. k, r, #1f77b4)
        #[arg(long)]
        color: Option<String>,

        /// 1D histogram type
        #[arg(long, value_enum)]
        histtype: Option<HistTypeArg>,

        /// Colormap for 2D marginals
        #[arg(long)]
        cmap: Option<String>,

        /// Logarithmic colour scale for 2D marginals
        #[arg(long)]
        log_norm: bool,

        /// Validate edges, counts and labels before rendering
        #[arg(long)]
        strict: bool,
    },

    /// Emit the corner_marginals_v0 panel-grid JSON
    Marginals {
        /// Input histogram document
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated axis labels; overrides labels in the document
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,

        /// Output file (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the strict histogram checks and print a JSON report
    Validate {
        /// Input histogram document
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum HistTypeArg {
    Bar,
    Step,
}

impl From<HistTypeArg> for HistType {
    fn from(v: HistTypeArg) -> Self {
        match v {
            HistTypeArg::Bar => HistType::Bar,
            HistTypeArg::Step => HistType::Step,
        }
    }
}

/// Style overrides given on the command line.
struct StyleArgs {
    theme: Option<String>,
    color: Option<String>,
    histtype: Option<HistTypeArg>,
    cmap: Option<String>,
    log_norm: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Render {
            input,
            output,
            labels,
            config,
            theme,
            color,
            histtype,
            cmap,
            log_norm,
            strict,
        } => {
            let style = StyleArgs { theme, color, histtype, cmap, log_norm };
            cmd_render(&input, &output, labels, config.as_ref(), style, strict)
        }
        Commands::Marginals { input, labels, output } => {
            cmd_marginals(&input, labels, output.as_ref())
        }
        Commands::Validate { input } => cmd_validate(&input),
    }
}

fn load_histogram(
    input: &Path,
    labels: Option<Vec<String>>,
) -> Result<(BinnedHistogram, Option<Vec<String>>)> {
    let doc = HistogramDocument::from_path(input)
        .with_context(|| format!("failed to load histogram from {}", input.display()))?;
    let (hist, doc_labels) = doc.into_histogram()?;
    tracing::info!(shape = ?hist.shape(), total = hist.total(), "histogram loaded");
    Ok((hist, labels.or(doc_labels)))
}

fn load_config(path: Option<&PathBuf>, style: StyleArgs) -> Result<VizConfig> {
    let yaml = path
        .map(|p| {
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read config {}", p.display()))
        })
        .transpose()?;
    let mut config =
        corner_viz_render::resolve_config_with_theme(yaml.as_deref(), style.theme.as_deref())?;

    if let Some(c) = style.color {
        config.hist1d.color =
            Color::parse(&c).with_context(|| format!("unknown colour: {c}"))?;
    }
    if let Some(h) = style.histtype {
        config.hist1d.histtype = h.into();
    }
    if let Some(cmap) = style.cmap {
        config.hist2d.cmap = cmap;
    }
    if style.log_norm {
        config.hist2d.norm = Norm::Log;
    }
    Ok(config)
}

fn cmd_render(
    input: &Path,
    output: &Path,
    labels: Option<Vec<String>>,
    config_path: Option<&PathBuf>,
    style: StyleArgs,
    strict: bool,
) -> Result<()> {
    let (hist, labels) = load_histogram(input, labels)?;
    if strict {
        hist.validate()?;
        if let Some(l) = &labels {
            validate_labels(l, hist.ndim())?;
        }
    }
    let config = load_config(config_path, style)?;

    let fig = corner_viz_render::render(
        &hist,
        labels.as_deref(),
        &config.hist1d,
        &config.hist2d,
        &config,
    )?;
    corner_viz_render::render_to_file(&fig, output, &config)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(path = %output.display(), width = fig.width(), height = fig.height(), "rendered");
    Ok(())
}

fn cmd_marginals(
    input: &Path,
    labels: Option<Vec<String>>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let (hist, labels) = load_histogram(input, labels)?;
    let grid = corner_viz::corner_grid(&hist, labels.as_deref())?;
    let json = grid.to_json_pretty()?;
    if let Some(path) = output {
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        println!("{json}");
    }
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let (hist, labels) = load_histogram(input, None)?;
    let mut problems = Vec::new();
    if let Err(e) = hist.validate() {
        problems.push(e.to_string());
    }
    if let Some(l) = &labels {
        if let Err(e) = validate_labels(l, hist.ndim()) {
            problems.push(e.to_string());
        }
    }

    let report = serde_json::json!({
        "input": input.display().to_string(),
        "shape": hist.shape(),
        "total": hist.total(),
        "valid": problems.is_empty(),
        "problems": problems,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !problems.is_empty() {
        anyhow::bail!("histogram failed validation ({} problem(s))", problems.len());
    }
    Ok(())
}
