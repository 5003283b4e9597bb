//! CLI binary for asn-labels.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `LabelRunConfig` and prints the result.

use anyhow::{Context, Result};
use asn_labels::{
    generate_labels, GenerationProgressCallback, LabelRunConfig, LabelRunSummary,
    ProgressCallback, SheetSize, TextColor, DEFAULT_FORMAT,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar advancing a step per rendered sheet.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_generation_start
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} sheets  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        bar.set_style(style);
        bar.set_prefix("Rendering");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    /// Stop ticking and wipe the bar so an error message prints on a clean line.
    fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_generation_start(&self, total_pages: usize, total_labels: u64) {
        self.bar.set_length(total_pages as u64);
        self.bar.set_message(format!("{total_labels} labels"));
    }

    fn on_page_complete(&self, _page_num: usize, _total_pages: usize, _labels: usize) {
        self.bar.inc(1);
    }

    fn on_generation_complete(&self, _total_pages: usize, _path: &Path) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # One A4 sheet, 14 x 4 labels, <ASN:000000001> … <ASN:000000056>
  generate_labels ~/labels

  # Ten sheets continuing from an earlier batch
  generate_labels ~/labels --asn_start 561 --pages 10

  # Letter paper, 20 x 3 grid, dark blue text
  generate_labels ~/labels -s letter -r 20 -c 3 --color 0 0 139

  # Custom label text (exactly one integer placeholder)
  generate_labels ~/labels --format "ASN{:06}"

FORMAT TEMPLATES:
  The template holds exactly one placeholder for the number:
    {}        plain number                 7   → 7
    {:09}     zero-padded to 9 digits      7   → 000000007
    {:>6}     right-aligned, space-filled  7   → "     7"
    {{ }}     literal braces
  Numbers wider than the declared width are printed in full.
  The same template names the output file: <first>-<last>.pdf

ENVIRONMENT VARIABLES:
  ASN_LABELS_START, ASN_LABELS_FORMAT, ASN_LABELS_ROWS, ASN_LABELS_COLUMNS,
  ASN_LABELS_PAGES, ASN_LABELS_SHEET_SIZE, ASN_LABELS_FONTSIZE
  RUST_LOG overrides the log filter (e.g. RUST_LOG=asn_labels=debug)
"#;

/// Generate a PDF sheet of ASN labels.
#[derive(Parser, Debug)]
#[command(
    name = "generate_labels",
    version,
    about = "Generate a PDF of sequential ASN (Archive Serial Number) labels",
    long_about = "Generate a PDF file in the given target folder containing labels for ASNs \
(Archive Serial Numbers) that can be attached to documents before they are scanned and \
consumed. The ASN on these labels is then extracted from the scan and assigned to the \
document, provided the archive is configured with a matching extraction pattern.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory the PDF is written into.
    target: PathBuf,

    /// The starting ASN used to produce labels.
    #[arg(short = 'a', long = "asn_start", visible_alias = "asn-start",
          env = "ASN_LABELS_START", default_value_t = 1)]
    asn_start: u64,

    /// Format of the generated ASN; the default produces e.g. <ASN:000000123>.
    #[arg(short, long, env = "ASN_LABELS_FORMAT", default_value = DEFAULT_FORMAT)]
    format: String,

    /// Number of rows on a single label sheet.
    #[arg(short, long, env = "ASN_LABELS_ROWS", default_value_t = 14,
          value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Number of columns on a single label sheet.
    #[arg(short, long, env = "ASN_LABELS_COLUMNS", default_value_t = 4,
          value_parser = clap::value_parser!(u32).range(1..))]
    columns: u32,

    /// Number of label sheets generated.
    #[arg(short, long, env = "ASN_LABELS_PAGES", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,

    /// Size of the label sheet: A3, A4, A5, letter, legal.
    #[arg(short = 's', long = "sheet_size", visible_alias = "sheet-size",
          env = "ASN_LABELS_SHEET_SIZE", default_value = "A4")]
    sheet_size: String,

    /// Text colour as RGB values (0–255 each).
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"], default_values_t = [0u8, 0, 0])]
    color: Vec<u8>,

    /// Font size in points.
    #[arg(long = "fontsize", visible_alias = "font-size", env = "ASN_LABELS_FONTSIZE",
          default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..))]
    fontsize: u32,

    /// Print a JSON summary of the run on stdout.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // With the progress bar active, INFO lines would tear through it.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and run ─────────────────────────────────────────────
    let progress = show_progress.then(CliProgressCallback::new);
    let progress_cb: Option<ProgressCallback> = progress
        .clone()
        .map(|cb| cb as Arc<dyn GenerationProgressCallback>);

    let summary = match run(&cli, progress_cb) {
        Ok(summary) => summary,
        Err(e) => {
            if let Some(ref bar) = progress {
                bar.clear();
            }
            return Err(e);
        }
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {} labels on {} {} sheet(s)  {}ms  →  {}",
            green("✔"),
            summary.labels,
            summary.pages,
            summary.sheet_size,
            summary.duration_ms,
            bold(&summary.path.display().to_string()),
        );
        eprintln!(
            "   {} … {}",
            dim(&summary.first_label),
            dim(&summary.last_label)
        );
    }

    Ok(())
}

/// Build the configuration and generate the sheet.
fn run(cli: &Cli, progress: Option<ProgressCallback>) -> Result<LabelRunSummary> {
    let config = build_config(cli, progress)?;
    generate_labels(&config).context("Label generation failed")
}

/// Map CLI args to `LabelRunConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<LabelRunConfig> {
    let sheet_size: SheetSize = cli.sheet_size.parse().context("Invalid --sheet_size")?;
    let color = parse_color(&cli.color)?;

    let mut builder = LabelRunConfig::builder()
        .target(cli.target.clone())
        .asn_start(cli.asn_start)
        .format_str(&cli.format)
        .rows(cli.rows)
        .columns(cli.columns)
        .pages(cli.pages)
        .sheet_size(sheet_size)
        .color(color)
        .font_size(cli.fontsize);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--color R G B` into a `TextColor`.
fn parse_color(values: &[u8]) -> Result<TextColor> {
    let rgb: [u8; 3] = values
        .try_into()
        .map_err(|_| anyhow::anyhow!("--color takes exactly 3 values, got {}", values.len()))?;
    Ok(TextColor::from(rgb))
}
