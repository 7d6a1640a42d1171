//! Command-line parsing for the celebrity data collector.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! collection pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::AssemblyPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "celeb", version, about = "Celebrity Bucks valuation + biography collector")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect a record for every ranked celebrity and export the table to CSV.
    Collect(CollectArgs),
    /// Collect and print the record for one celebrity.
    Lookup(LookupArgs),
    /// Print the ranked listing from the valuation feed.
    List(ListArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CollectArgs {
    /// Directory the timestamped CSV is written into.
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,

    /// Worker threads fetching pages (1 keeps the run strictly sequential).
    #[arg(short = 'w', long, default_value_t = 1)]
    pub workers: usize,

    /// Minimum spacing between requests to the same site.
    #[arg(long, default_value_t = 1000)]
    pub min_interval_ms: u64,

    /// What to do when a field cannot be extracted.
    #[arg(long, value_enum, default_value_t = AssemblyPolicy::BestEffort)]
    pub policy: AssemblyPolicy,

    /// Only collect the top N ranked celebrities.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Parser, Clone)]
pub struct LookupArgs {
    /// Exact name as listed in the feed (case-sensitive).
    pub name: String,
}

#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Show only the top N entries.
    #[arg(long)]
    pub top: Option<usize>,

    /// Print bare names, one per line, in rank order.
    #[arg(long)]
    pub names: bool,
}
