use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cr16_rs::{AsmConfig, AsmError, Assembler, Diagnostics, TextSink};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts CR16 assembly into its machine language equivalent, one 16-bit binary word per line"
)]
struct Opts {
    /// Assembly source (one label or instruction per line)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
    /// Where to write the machine language image
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
    /// Assembler settings as JSON (see `AsmConfig`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Reject out-of-range registers and immediates instead of truncating
    #[arg(long)]
    strict: bool,
    /// Report every faulty line instead of stopping at the first
    #[arg(long)]
    collect_errors: bool,
    /// Export the label table as JSON (Vec<{ index, name }>)
    #[arg(long, value_name = "FILE")]
    labels_out: Option<PathBuf>,
}

fn load_config(opts: &Opts) -> Result<AsmConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AsmConfig::default(),
    };
    if opts.strict {
        cfg.strict_operands = true;
    }
    if opts.collect_errors {
        cfg.diagnostics = Diagnostics::CollectAll;
    }
    Ok(cfg)
}

fn run(opts: &Opts) -> Result<()> {
    let cfg = load_config(opts)?;
    let source = fs::read_to_string(&opts.input).with_context(|| format!("reading {}", opts.input.display()))?;
    let lines: Vec<&str> = source.lines().collect();

    let file = File::create(&opts.output).with_context(|| format!("creating {}", opts.output.display()))?;
    let mut sink = TextSink::new(BufWriter::new(file));
    let assembled = Assembler::new(cfg)
        .assemble_into(&lines, &mut sink)
        .map_err(anyhow::Error::from)
        .and_then(|labels| {
            let words = sink.written();
            sink.finish()
                .with_context(|| format!("flushing {}", opts.output.display()))?;
            Ok((labels, words))
        });
    let (labels, words) = match assembled {
        Ok(done) => done,
        Err(e) => {
            // a failed run leaves no image behind
            let _ = fs::remove_file(&opts.output);
            return Err(e);
        }
    };

    if let Some(path) = &opts.labels_out {
        let json = serde_json::to_string_pretty(&labels.entries())?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    info!(words, labels = labels.len(), output = %opts.output.display(), "assembly complete");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    if let Err(e) = run(&opts) {
        if let Some(AsmError::Many(errs)) = e.downcast_ref::<AsmError>() {
            for err in errs {
                eprintln!("error: {err}");
            }
        }
        return Err(e);
    }
    Ok(())
}
