use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use bloombits_core::{Bloom, Generator, SectionConfig, BLOOM_BIT_LENGTH};

#[derive(Parser)]
#[command(name = "bloombits", about = "Rotate block bloom filters into per-bit section bitsets")]
struct Cli {
    /// Debug-level logging on stderr
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Feed one hex bloom per line and print the rotated bitsets
    Rotate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, conflicts_with = "config")]
        sections: Option<u64>,
        /// JSON section config, e.g. {"sections": 4096}
        #[arg(long)]
        config: Option<PathBuf>,
        /// Bloom bit positions to print (default: all)
        #[arg(long, num_args=1.., value_delimiter=',')]
        bits: Vec<usize>,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },

    /// Print a validated section config
    Config {
        #[arg(long)]
        sections: Option<u64>,
    },
}

#[derive(Serialize)]
struct BitsetOut {
    bit: usize,
    hex: String,
}

#[derive(Serialize)]
struct RotateOut {
    sections: u64,
    bitsets: Vec<BitsetOut>,
}

fn section_config(sections: Option<u64>, config: Option<PathBuf>) -> Result<SectionConfig> {
    let cfg = match (sections, config) {
        (Some(s), _) => SectionConfig::new(s)?,
        (None, Some(p)) => SectionConfig::load(&p).with_context(|| format!("config {}", p.display()))?,
        (None, None) => SectionConfig::default(),
    };
    Ok(cfg)
}

fn read_blooms(input: &Path) -> Result<Vec<Bloom>> {
    let text = fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?;
    let mut out = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() { continue; }
        let bloom: Bloom = line.parse().map_err(|e| anyhow!("line {}: {e}", n + 1))?;
        out.push(bloom);
    }
    Ok(out)
}

fn rotate(cfg: SectionConfig, blooms: &[Bloom], bits: &[usize]) -> Result<RotateOut> {
    if blooms.len() as u64 != cfg.sections {
        bail!("section needs {} blooms, input has {}", cfg.sections, blooms.len());
    }
    let mut generator = Generator::from_config(&cfg)?;
    for (k, bloom) in blooms.iter().enumerate() {
        generator.add_bloom(k as u64, bloom)?;
    }
    let picked: Vec<usize> = if bits.is_empty() { (0..BLOOM_BIT_LENGTH).collect() } else { bits.to_vec() };
    let mut bitsets = Vec::with_capacity(picked.len());
    for bit in picked {
        bitsets.push(BitsetOut { bit, hex: hex::encode(generator.bitset(bit)?) });
    }
    Ok(RotateOut { sections: cfg.sections, bitsets })
}

fn print_json<T: Serialize>(v: &T, pretty: bool) -> Result<()> {
    let s = if pretty { serde_json::to_string_pretty(v)? } else { serde_json::to_string(v)? };
    println!("{s}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    match cli.cmd {
        Cmd::Rotate { input, sections, config, bits, pretty } => {
            let cfg = section_config(sections, config)?;
            let blooms = read_blooms(&input)?;
            let out = rotate(cfg, &blooms, &bits)?;
            info!(sections = out.sections, bitsets = out.bitsets.len(), "section rotated");
            print_json(&out, pretty)?;
        }
        Cmd::Config { sections } => {
            let cfg = section_config(sections, None)?;
            print_json(&cfg, true)?;
        }
    }
    Ok(())
}
