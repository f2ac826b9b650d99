//! pdfmark CLI - structural PDF to Markdown conversion

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use pdfmark::{ConvertOptions, ConvertResult, Converter, OutputFormat, ParseOptions};

#[derive(Parser)]
#[command(name = "pdfmark")]
#[command(version)]
#[command(about = "Convert PDF documents to structured Markdown", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF to Markdown
    Convert {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: Format,

        /// Skip pages whose content cannot be decoded
        #[arg(long)]
        lenient: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Markdown document
    Markdown,
    /// JSON dump of the inferred structure
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => OutputFormat::Markdown,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            lenient,
        } => cmd_convert(&input, &output, format, lenient),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn cmd_convert(input: &Path, output: &Path, format: Format, lenient: bool) -> pdfmark::Result<()> {
    let mut parse = ParseOptions::new();
    if lenient {
        parse = parse.lenient();
    }
    let options = ConvertOptions::new()
        .with_parse_options(parse)
        .with_format(format.into());

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {}...", input.display()));

    let result = Converter::new(options).convert_file(input);
    pb.finish_and_clear();
    let result = result?;

    result.write_to(output)?;
    print_summary(output, &result);
    Ok(())
}

fn print_summary(output: &Path, result: &ConvertResult) {
    let stats = &result.stats;
    println!("{} {}", "Saved to".green().bold(), output.display());
    println!("  {} {}", "Pages:".dimmed(), stats.page_count);
    println!(
        "  {} {} lines ({} distinct)",
        "Boilerplate removed:".dimmed(),
        stats.boilerplate_removed,
        stats.boilerplate_entries
    );
    println!(
        "  {} {} headings, {} list items, {} contents entries, {} paragraphs",
        "Structure:".dimmed(),
        stats.heading_count,
        stats.list_item_count,
        stats.toc_entry_count,
        stats.paragraph_count
    );
    println!(
        "  {} {} lines, {}",
        "Output:".dimmed(),
        stats.output_lines,
        format_size(result.content_len())
    );
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn cmd_version() {
    println!("{} {}", "pdfmark".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Structural PDF to Markdown conversion");
}
