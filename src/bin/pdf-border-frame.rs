//! PDF Border Frame CLI tool
//!
//! A command-line tool that draws a rectangle frame on each page of a PDF.

use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process;

use pdf_border_frame::layout::{FrameOptions, Margins};
use pdf_border_frame::pdf::apply_frame;

/// Add a rectangle frame to each page of a PDF document.
///
/// The framed copy is written next to the input as <name>_framed.pdf.
#[derive(Parser)]
#[command(name = "pdf-border-frame")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Default 20pt margins and a 2pt line
    pdf-border-frame report.pdf

    # Wider left margin for binding, thin line
    pdf-border-frame --l 50 --r 20 --t 30 --b 30 --th 0.5 report.pdf")]
struct Cli {
    /// Path to the input PDF file
    input_pdf: PathBuf,

    /// Left margin in points
    #[arg(long = "l", value_name = "LEFT", default_value_t = FrameOptions::DEFAULT_MARGIN, allow_negative_numbers = true)]
    left: f64,

    /// Right margin in points
    #[arg(long = "r", value_name = "RIGHT", default_value_t = FrameOptions::DEFAULT_MARGIN, allow_negative_numbers = true)]
    right: f64,

    /// Top margin in points
    #[arg(long = "t", value_name = "TOP", default_value_t = FrameOptions::DEFAULT_MARGIN, allow_negative_numbers = true)]
    top: f64,

    /// Bottom margin in points
    #[arg(long = "b", value_name = "BOTTOM", default_value_t = FrameOptions::DEFAULT_MARGIN, allow_negative_numbers = true)]
    bottom: f64,

    /// Frame line thickness in points
    #[arg(long = "th", value_name = "THICKNESS", default_value_t = FrameOptions::DEFAULT_THICKNESS, allow_negative_numbers = true)]
    thickness: f64,

    /// Show progress (-v) or per-page detail (-vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            margins: Margins {
                left: self.left,
                right: self.right,
                top: self.top,
                bottom: self.bottom,
            },
            thickness: self.thickness,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    init_logging(cli.verbose);

    match cmd_frame(&cli) {
        Ok(output) => {
            println!("PDF with rectangle frame saved to {}", output.display());
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Configure env_logger from the verbosity flag, unless RUST_LOG is set
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Frame every page of the input PDF
fn cmd_frame(cli: &Cli) -> anyhow::Result<PathBuf> {
    let options = cli.frame_options();

    log::info!(
        "Framing {} (margins l={} r={} t={} b={}, thickness {})",
        cli.input_pdf.display(),
        options.margins.left,
        options.margins.right,
        options.margins.top,
        options.margins.bottom,
        options.thickness,
    );

    let output = apply_frame(&cli.input_pdf, &options)
        .with_context(|| format!("Failed to frame {}", cli.input_pdf.display()))?;

    Ok(output)
}
