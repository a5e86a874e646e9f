//! Equihash Verifier CLI
//!
//! A command-line tool for checking Equihash proofs and packed difficulties.
//!
//! # Commands
//!
//! - `verify` - Check an Equihash solution for a header and nonce
//! - `check-target` - Check a proof buffer's SHA-256 against a packed difficulty
//! - `getdiff` - Show the approximate magnitude of a packed difficulty
//! - `expand` - Show the 256-bit target of a packed difficulty
//! - `batch` - Run a JSON job file across worker threads
//! - `benchmark` - Measure verification throughput

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use ehverify::algorithm::{minimal_from_indices, SUPPORTED_PARAMS};
use ehverify::config::{default_config_path, Config, Overrides};
use ehverify::jobs::{parse_jobs, run_jobs};
use ehverify::{approximate_difficulty, check_target, explain, Difficulty, Params};

#[derive(Parser)]
#[command(name = "ehverify")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "Equihash proof-of-work and packed-difficulty verifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/ehverify/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, e.g. "debug" or "ehverify_core=trace" (RUST_LOG wins)
    #[arg(long, global = true)]
    log_filter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify an Equihash solution
    Verify {
        /// Block header (hex, 32 bytes)
        #[arg(long)]
        header: String,

        /// Nonce (hex, 8 bytes)
        #[arg(long)]
        nonce: String,

        /// Minimally encoded solution (hex)
        #[arg(long)]
        solution: String,

        /// Equihash N (default: from config, 150)
        #[arg(short)]
        n: Option<u32>,

        /// Equihash K (default: from config, 5)
        #[arg(short)]
        k: Option<u32>,

        /// Print which rule an invalid solution broke
        #[arg(long)]
        explain: bool,
    },

    /// Check a proof buffer's SHA-256 against a packed difficulty
    CheckTarget {
        /// Proof buffer (hex)
        #[arg(long)]
        solution: String,

        /// Packed difficulty (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_packed)]
        bits: u32,
    },

    /// Show the approximate magnitude of a packed difficulty
    Getdiff {
        /// Packed difficulty (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_packed)]
        bits: u32,
    },

    /// Show the 256-bit target a packed difficulty expands to
    Expand {
        /// Packed difficulty (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_packed)]
        bits: u32,
    },

    /// Run a JSON job file
    Batch {
        /// Path to the job file
        #[arg(long)]
        file: PathBuf,

        /// Number of worker threads (default: from config, else CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of verifications to run
        #[arg(short, long, default_value = "1000")]
        count: u32,
    },
}

fn parse_packed(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid packed difficulty '{}': {}", s, e))
}

fn decode_hex(what: &str, value: &str) -> anyhow::Result<Vec<u8>> {
    hex::decode(value).map_err(|e| anyhow::anyhow!("invalid {} hex: {}", what, e))
}

fn main() {
    let cli = Cli::parse();

    let (n, k, threads) = match &cli.command {
        Commands::Verify { n, k, .. } => (*n, *k, None),
        Commands::Batch { threads, .. } => (None, None, *threads),
        _ => (None, None, None),
    };
    let overrides = Overrides {
        n,
        k,
        threads,
        log_filter: cli.log_filter.clone(),
        json: cli.json,
    };

    let config = match Config::load_or_default(cli.config.as_deref(), default_config_path()) {
        Ok(config) => config.with_overrides(overrides),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.log_filter);

    let result = match cli.command {
        Commands::Verify {
            header,
            nonce,
            solution,
            explain,
            ..
        } => cmd_verify(&header, &nonce, &solution, explain, &config),
        Commands::CheckTarget { solution, bits } => cmd_check_target(&solution, bits, &config),
        Commands::Getdiff { bits } => cmd_getdiff(bits, &config),
        Commands::Expand { bits } => cmd_expand(bits, &config),
        Commands::Batch { file, .. } => cmd_batch(&file, &config),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_verify(
    header: &str,
    nonce: &str,
    solution: &str,
    show_reason: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let header = decode_hex("header", header)?;
    let nonce = decode_hex("nonce", nonce)?;
    let solution = decode_hex("solution", solution)?;

    let rejection = explain(&header, &nonce, &solution, config.n, config.k)?;
    let valid = rejection.is_none();

    if config.json {
        let mut out = serde_json::json!({ "n": config.n, "k": config.k, "valid": valid });
        if let (true, Some(rejection)) = (show_reason, rejection) {
            out["rejection"] = rejection.to_string().into();
        }
        println!("{}", out);
    } else {
        println!("Equihash({}, {}): {}", config.n, config.k, if valid { "valid" } else { "invalid" });
        if let (true, Some(rejection)) = (show_reason, rejection) {
            println!("Reason: {}", rejection);
        }
    }

    Ok(())
}

fn cmd_check_target(solution: &str, bits: u32, config: &Config) -> anyhow::Result<()> {
    let solution = decode_hex("solution", solution)?;
    let reached = check_target(&solution, bits);
    let hash = ehverify::algorithm::proof_hash(&solution);

    if config.json {
        println!(
            "{}",
            serde_json::json!({ "bits": bits, "hash": hex::encode(hash), "reached": reached })
        );
    } else {
        println!("Proof hash: {}", hex::encode(hash));
        println!("Difficulty: {}", Difficulty(bits));
        println!("Target reached: {}", reached);
    }

    Ok(())
}

fn cmd_getdiff(bits: u32, config: &Config) -> anyhow::Result<()> {
    let value = approximate_difficulty(bits);
    if config.json {
        println!("{}", serde_json::json!({ "bits": bits, "difficulty": value }));
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn cmd_expand(bits: u32, config: &Config) -> anyhow::Result<()> {
    let difficulty = Difficulty(bits);
    let target = difficulty.expand()?;
    let (order, mantissa) = difficulty.unpack();

    if config.json {
        println!(
            "{}",
            serde_json::json!({
                "bits": bits,
                "order": order,
                "mantissa": mantissa,
                "target": target.to_string(),
            })
        );
    } else {
        println!("Order: {}", order);
        println!("Mantissa: {:#x}", mantissa);
        println!("Target: {}", target);
    }
    Ok(())
}

fn cmd_batch(file: &Path, config: &Config) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", file.display(), e))?;
    let jobs = parse_jobs(&contents)?;
    let threads = config.threads.unwrap_or_else(num_cpus::get);

    let start = Instant::now();
    let reports = run_jobs(&jobs, config.params()?, threads)?;
    let elapsed = start.elapsed();

    for report in &reports {
        if config.json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            let status = match (report.valid, &report.error) {
                (Some(true), _) => "valid".to_string(),
                (Some(false), _) => match &report.rejection {
                    Some(reason) => format!("invalid ({})", reason),
                    None => "invalid".to_string(),
                },
                (None, Some(error)) => format!("error: {}", error),
                (None, None) => "error".to_string(),
            };
            println!("#{} {}: {}", report.index, report.kind, status);
        }
    }

    if !config.json {
        let valid = reports.iter().filter(|r| r.valid == Some(true)).count();
        println!(
            "\n{} jobs, {} valid, {} threads, {:.2}s",
            reports.len(),
            valid,
            threads,
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}

fn cmd_benchmark(count: u32) -> anyhow::Result<()> {
    println!("Running benchmark with {} verifications per parameter set...", count);

    let mut header = [0u8; 32];
    getrandom::getrandom(&mut header).map_err(|e| anyhow::anyhow!("random header: {}", e))?;
    let nonce = [0u8; 8];

    println!("\nResults:");
    for params in SUPPORTED_PARAMS {
        let solution = distinct_solution(&params)?;

        let start = Instant::now();
        for i in 0..count {
            let mut nonce = nonce;
            nonce[..4].copy_from_slice(&i.to_le_bytes());
            let _ = ehverify::verify(&header, &nonce, &solution, params.n(), params.k())?;
        }
        let elapsed = start.elapsed();
        let rate = count as f64 / elapsed.as_secs_f64();

        println!(
            "  {:<16} {:>12.2} verifications/s  ({} bytes/solution)",
            params.to_string(),
            rate,
            params.solution_width()
        );
    }

    Ok(())
}

/// A solution with distinct, evenly spread indices. Expanding every leaf is
/// the fixed cost of a verification before round 1 can reject it.
fn distinct_solution(params: &Params) -> anyhow::Result<Vec<u8>> {
    let len = params.solution_len() as u32;
    let step = params.index_limit() / len;
    let indices: Vec<u32> = (0..len).map(|i| i * step).collect();
    Ok(minimal_from_indices(params, &indices)?)
}
