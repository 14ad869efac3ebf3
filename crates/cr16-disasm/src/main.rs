use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use std::collections::HashMap;
use std::path::Path;

use cr16_rs::labels::LabelKV;
use cr16_disasm::{build_listing, load_image, render_text};

#[derive(Parser, Debug)]
#[command(author, version, about = "CR16 disassembler CLI", long_about=None)]
struct Cli {
    /// Text image written by cr16-asm (16 binary digits per line)
    #[arg(value_name = "IMAGE")]
    input: String,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print image statistics
    Info,
    /// Disassemble instruction indices [start, end)
    Range {
        start: usize,
        /// Exclusive end (default: end of image)
        end: Option<usize>,
        /// Show the binary word next to each instruction
        #[arg(long)]
        show_bits: bool,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Disassemble the whole image
    List {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Show the binary word next to each instruction (text format only)
        #[arg(long)]
        show_bits: bool,
        /// Import labels from JSON (Vec<{ index, name }>, as written by cr16-asm --labels-out)
        #[arg(long, value_name = "FILE")]
        labels_in: Option<String>,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn read_labels(path: &str) -> Result<HashMap<usize, String>> {
    let txt = std::fs::read_to_string(path)?;
    let kvs: Vec<LabelKV> = serde_json::from_str(&txt)?;
    let mut labels = HashMap::new();
    for kv in kvs {
        // several names can share an index; keep the first in file order
        labels.entry(kv.index).or_insert(kv.name);
    }
    Ok(labels)
}

fn emit(out: Option<String>, buf: String) -> Result<()> {
    if let Some(path) = out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let img = load_image(Path::new(&cli.input))?;

    match cli.cmd {
        Command::Info => {
            let listing = build_listing(&img, &HashMap::new());
            let unknown = listing.iter().filter(|e| e.text.starts_with(".word")).count();
            println!("{:<12} {}", "words", img.len());
            println!("{:<12} {}", "undecodable", unknown);
        }
        Command::Range { start, end, show_bits, out } => {
            let end = end.unwrap_or(img.len()).min(img.len());
            anyhow::ensure!(end >= start, "end must be >= start");
            let listing = build_listing(&img, &HashMap::new());
            emit(out, render_text(&listing[start..end], show_bits))?;
        }
        Command::List { format, show_bits, labels_in, out } => {
            let labels = match &labels_in {
                Some(path) => read_labels(path)?,
                None => HashMap::new(),
            };
            let listing = build_listing(&img, &labels);
            let buf = match format {
                OutputFormat::Text => render_text(&listing, show_bits),
                OutputFormat::Json => serde_json::to_string_pretty(&listing)? + "\n",
            };
            emit(out, buf)?;
        }
    }

    Ok(())
}
