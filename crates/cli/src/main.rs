//! execsel CLI - inspect execution-strategy selection.

use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use execsel_backend::reduce;
use execsel_core::{
    all_random_access, common_category, select, selection_table, ComparisonCategory,
    IteratorCategory, ParallelBackend, PolicyKind, SelectionRow, StrategyDescriptor, PAR,
    PAR_BACKEND, PAR_UNSEQ, SEQ, UNSEQ,
};

#[derive(Parser)]
#[command(name = "execsel")]
#[command(about = "Inspect execution-strategy selection", long_about = None)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a strategy for a policy and a list of iterator categories
    Select {
        /// Execution policy (seq, unseq, par, par-unseq)
        #[arg(long)]
        policy: PolicyKind,
        /// Iterator category, repeatable (input, forward, bidirectional, random-access, contiguous, output)
        #[arg(long = "iter")]
        iterators: Vec<IteratorCategory>,
    },
    /// Print the full selection table
    Table,
    /// Show the parallel backend this build was configured with
    Backend,
    /// Compute the common comparison category of a set of categories
    Common {
        /// Comparison category, repeatable (strong, weak, partial)
        #[arg(long = "category")]
        categories: Vec<ComparisonCategory>,
    },
    /// Sum 0..len under a policy and report the strategy used
    Run {
        /// Execution policy
        #[arg(long, default_value = "par-unseq")]
        policy: PolicyKind,
        /// Number of elements
        #[arg(long, default_value = "1000000")]
        len: u64,
    },
}

/// Result of `execsel select`.
#[derive(Debug, Serialize)]
struct SelectReport {
    policy: PolicyKind,
    iterators: Vec<IteratorCategory>,
    all_random_access: bool,
    descriptor: StrategyDescriptor,
    parallel_backend: Option<ParallelBackend>,
}

impl SelectReport {
    fn new(policy: PolicyKind, iterators: Vec<IteratorCategory>) -> Self {
        let all_random_access = all_random_access(&iterators);
        let descriptor = select(policy, all_random_access);
        Self {
            policy,
            iterators,
            all_random_access,
            descriptor,
            parallel_backend: descriptor.backend.resolve(),
        }
    }
}

/// Result of `execsel run`.
#[derive(Debug, Serialize)]
struct RunReport {
    policy: PolicyKind,
    len: u64,
    sum: u64,
    descriptor: StrategyDescriptor,
    elapsed_ms: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Select { policy, iterators } => {
            let report = SelectReport::new(policy, iterators);
            debug!("Selected {} for {:?}", report.descriptor, report.iterators);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_select(&report));
            }
        }
        Commands::Table => {
            let table = selection_table();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print!("{}", render_table(&table));
            }
        }
        Commands::Backend => {
            if cli.json {
                println!("{}", serde_json::to_string(&PAR_BACKEND)?);
            } else {
                println!("Parallel backend: {} (feature `{}`)", PAR_BACKEND, PAR_BACKEND.feature());
            }
        }
        Commands::Common { categories } => {
            let common = common_category(&categories);
            if cli.json {
                println!("{}", serde_json::to_string(&common)?);
            } else {
                println!("Common category: {common}");
            }
        }
        Commands::Run { policy, len } => {
            let report = run_sum(policy, len)?;
            info!("Summed {} elements in {:.2} ms", report.len, report.elapsed_ms);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Policy: {}", report.policy);
                println!("  Strategy: {}", report.descriptor);
                println!("  Sum: {}", report.sum);
                println!("  Elapsed: {:.2} ms", report.elapsed_ms);
            }
        }
    }

    Ok(())
}

fn run_sum(policy: PolicyKind, len: u64) -> Result<RunReport> {
    let len_usize = usize::try_from(len)
        .map_err(|_| anyhow::anyhow!("Length {len} does not fit in memory on this platform"))?;
    let mut data: Vec<u64> = Vec::new();
    data.try_reserve_exact(len_usize)
        .map_err(|e| anyhow::anyhow!("Cannot allocate {len} elements: {e}"))?;
    data.extend(0..len);

    let add = |a: u64, b: u64| a.wrapping_add(b);
    let start = Instant::now();
    let sum = match policy {
        PolicyKind::Sequenced => reduce(SEQ, &data, 0, add),
        PolicyKind::Unsequenced => reduce(UNSEQ, &data, 0, add),
        PolicyKind::Parallel => reduce(PAR, &data, 0, add),
        PolicyKind::ParallelUnsequenced => reduce(PAR_UNSEQ, &data, 0, add),
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    Ok(RunReport {
        policy,
        len,
        sum,
        // A Vec is contiguous, so the slice path always classifies as random-access.
        descriptor: select(policy, true),
        elapsed_ms,
    })
}

fn render_select(report: &SelectReport) -> String {
    let iterators = if report.iterators.is_empty() {
        "(none)".to_string()
    } else {
        report
            .iterators
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::new();
    out.push_str(&format!("Policy: {}\n", report.policy));
    out.push_str(&format!("  Iterators: {iterators}\n"));
    out.push_str(&format!("  All random-access: {}\n", report.all_random_access));
    out.push_str(&format!("  Vector: {}\n", report.descriptor.vector));
    out.push_str(&format!("  Backend: {}\n", report.descriptor.backend));
    out
}

fn render_table(rows: &[SelectionRow]) -> String {
    let mut out = format!("{:<10} {:<14} {:<7} {}\n", "policy", "random-access", "vector", "backend");
    for row in rows {
        out.push_str(&format!(
            "{:<10} {:<14} {:<7} {}\n",
            row.policy.as_str(),
            row.all_random_access,
            row.descriptor.vector,
            row.descriptor.backend,
        ));
    }
    out
}
