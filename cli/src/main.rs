//! pdf2word CLI - PDF to Word conversion tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2word::{to_json, Error, JsonFormat, Pdf2Word, ProgressReporter};

#[derive(Parser)]
#[command(name = "pdf2word")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert PDF documents to Word, keeping headings, lists and page breaks", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF to DOCX
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input name with a .docx extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Try OCR when the PDF has no extractable text
        #[arg(long, env = "PDF2WORD_OCR")]
        ocr: bool,

        /// Request layout-accurate mode
        #[arg(long)]
        layout_accurate: bool,
    },

    /// Print the classified paragraphs of each page as JSON
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Forwards conversion progress to a terminal progress bar.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn on_progress(&self, percent: u8, status: &str) {
        self.bar.set_position(percent as u64);
        self.bar.set_message(status.to_string());
    }

    fn on_notice(&self, message: &str) {
        self.bar
            .println(format!("{} {}", "Note:".yellow().bold(), message));
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            ocr,
            layout_accurate,
        }) => cmd_convert(&input, output.as_deref(), ocr, layout_accurate),
        Some(Commands::Inspect { input, compact }) => cmd_inspect(&input, compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, None, false, false)
            } else {
                println!("{}", "Usage: pdf2word <FILE>".yellow());
                println!("       pdf2word --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        if matches!(e.downcast_ref::<Error>(), Some(Error::EmptyText)) {
            eprintln!(
                "{}: {} (scanned documents need --ocr)",
                "No text".yellow().bold(),
                e
            );
        } else {
            eprintln!("{}: {}", "Error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    ocr: bool,
    layout_accurate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut builder = Pdf2Word::new().with_progress(Arc::new(BarReporter { bar: pb.clone() }));
    if ocr {
        builder = builder.with_ocr();
    }
    if layout_accurate {
        builder = builder.layout_accurate();
    }

    let converted = builder.convert(input);
    let converted = match converted {
        Ok(converted) => converted,
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };
    pb.finish_with_message("Done!");

    let target = output_target(input, output, &converted.file_name);
    log::debug!("Writing {} bytes to {}", converted.bytes.len(), target.display());
    fs::write(&target, &converted.bytes)?;

    let stats = &converted.stats;
    println!("\n{} {}", "Saved to".green().bold(), target.display());
    println!("  {} {} pages", "├─".dimmed(), stats.pages);
    println!("  {} {} headings", "├─".dimmed(), stats.headings);
    println!("  {} {} list items", "├─".dimmed(), stats.list_items);
    println!("  {} {} paragraphs", "└─".dimmed(), stats.paragraphs);

    Ok(())
}

/// Explicit output path, or the converted name next to the input.
fn output_target(input: &Path, output: Option<&Path>, file_name: &str) -> PathBuf {
    output.map(Path::to_path_buf).unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(file_name)
    })
}

fn cmd_inspect(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let pages = Pdf2Word::new().analyze(&data)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    println!("{}", to_json(&pages, format)?);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let metadata = pdf2word::extract_metadata(&data)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    for (label, value) in metadata.fields() {
        println!("{}: {}", label.bold(), value);
    }

    let content = pdf2word::extract_content(&data)?;
    let words = content.text.split_whitespace().count();

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Text runs".bold(), content.run_count());
    println!("{}: {}", "Words".bold(), words);
    if content.is_text_empty() {
        println!("{}", "No extractable text (scanned document?)".yellow());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf2word".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to Word conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/pdf2word".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_defaults_next_to_input() {
        let target = output_target(Path::new("docs/report.pdf"), None, "report.docx");
        assert_eq!(target, PathBuf::from("docs/report.docx"));

        let explicit = output_target(
            Path::new("docs/report.pdf"),
            Some(Path::new("out/final.docx")),
            "report.docx",
        );
        assert_eq!(explicit, PathBuf::from("out/final.docx"));
    }

    #[test]
    fn test_convert_args() {
        let cli = Cli::try_parse_from(["pdf2word", "convert", "in.pdf", "-o", "out.docx", "--ocr"])
            .unwrap();
        match cli.command {
            Some(Commands::Convert {
                input,
                output,
                ocr,
                layout_accurate,
            }) => {
                assert_eq!(input, PathBuf::from("in.pdf"));
                assert_eq!(output, Some(PathBuf::from("out.docx")));
                assert!(ocr);
                assert!(!layout_accurate);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_convert_rejects_non_pdf_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.pdf");
        fs::write(&input, b"plain text, not a PDF").unwrap();

        let result = cmd_convert(&input, None, false, false);
        assert!(result.is_err());
        assert!(!dir.path().join("notes.docx").exists());
    }

    #[test]
    fn test_info_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_info(&dir.path().join("absent.pdf")).is_err());
    }
}
