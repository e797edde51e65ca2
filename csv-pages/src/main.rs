//! csv-pages CLI: ruled PDF pages from CSV topics.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;

use csv_pages::config::{DEFAULT_FONT_SIZE, DEFAULT_LINE_SPACING, DEFAULT_OUTPUT};
use csv_pages::{load_rows, render_to_file, RenderConfig, RenderSummary};

#[derive(Parser)]
#[command(name = "csv-pages")]
#[command(version)]
#[command(about = "Generate ruled PDF pages from CSV topics", long_about = None)]
struct Cli {
    /// Path to the CSV file (needs Topic and Pages columns)
    #[arg(long, value_name = "FILE")]
    csv: PathBuf,

    /// Output PDF file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Line spacing in mm
    #[arg(long, default_value_t = DEFAULT_LINE_SPACING, allow_negative_numbers = true)]
    lines: f64,

    /// Header font size
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE, allow_negative_numbers = true)]
    fontsize: f64,

    /// Compress page content streams
    #[arg(long)]
    compress: bool,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        let config = RenderConfig::default()
            .with_output(&self.output)
            .with_line_spacing(self.lines)
            .with_font_size(self.fontsize)
            .with_compression(self.compress);
        match self.csv.file_stem() {
            Some(stem) => config.with_title(stem.to_string_lossy()),
            None => config,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            println!("PDF generated successfully: {}", summary.output.display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> csv_pages::Result<RenderSummary> {
    let config = cli.render_config();
    config.validate()?;
    let rows = load_rows(&cli.csv)?;
    render_to_file(&rows, &config)
}
