//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initialises logging
//! - fetches the valuation feed
//! - runs the collection pipeline or a single lookup
//! - prints progress and results

use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{CollectArgs, Command, ListArgs, LookupArgs};
use crate::data::{CelebritySource, HttpSource, SourceConfig, celebrity_names, require_name};
use crate::domain::{AssemblyPolicy, CollectConfig};
use crate::error::AppError;
use crate::progress::StdoutProgress;

pub mod pipeline;

/// Entry point for the `celeb` binary.
pub fn run() -> Result<(), AppError> {
    // `celeb` on its own runs a full collection.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Collect(args) => handle_collect(args),
        Command::Lookup(args) => handle_lookup(args),
        Command::List(args) => handle_list(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_collect(args: CollectArgs) -> Result<(), AppError> {
    let config = collect_config_from_args(&args)?;
    pipeline::run_collection(&config, &StdoutProgress)?;
    Ok(())
}

fn handle_lookup(args: LookupArgs) -> Result<(), AppError> {
    let name = require_name(&args.name)?;
    let source = HttpSource::new(SourceConfig::from_env(Duration::ZERO))?;
    let listing = source.fetch_listing()?;

    let record = crate::record::assemble_record(
        &source,
        &listing,
        name,
        AssemblyPolicy::BestEffort,
        Local::now().naive_local(),
    )?;

    print!("{}", crate::report::format_record(&record));
    Ok(())
}

fn handle_list(args: ListArgs) -> Result<(), AppError> {
    let source = HttpSource::new(SourceConfig::from_env(Duration::ZERO))?;
    let listing = source.fetch_listing()?;
    if args.names {
        let shown = args.top.unwrap_or(listing.len());
        for name in celebrity_names(&listing).into_iter().take(shown) {
            println!("{name}");
        }
    } else {
        print!("{}", crate::report::format_listing(&listing, args.top));
    }
    Ok(())
}

pub fn collect_config_from_args(args: &CollectArgs) -> Result<CollectConfig, AppError> {
    if args.workers == 0 {
        return Err(AppError::config("--workers must be at least 1."));
    }
    if args.limit == Some(0) {
        return Err(AppError::config("--limit must be at least 1."));
    }
    Ok(CollectConfig {
        out_dir: args.out_dir.clone(),
        workers: args.workers,
        min_interval: Duration::from_millis(args.min_interval_ms),
        policy: args.policy,
        limit: args.limit,
    })
}

/// Rewrite argv so `celeb` defaults to `celeb collect`.
///
/// Rules:
/// - `celeb`                       -> `celeb collect`
/// - `celeb -w 4 ...`              -> `celeb collect -w 4 ...`
/// - `celeb --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("collect".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "collect" | "lookup" | "list");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "collect flags".
    if arg1.starts_with('-') {
        argv.insert(1, "collect".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_collects() {
        assert_eq!(rewrite_args(argv(&["celeb"])), argv(&["celeb", "collect"]));
    }

    #[test]
    fn leading_flags_go_to_collect() {
        assert_eq!(
            rewrite_args(argv(&["celeb", "-w", "4"])),
            argv(&["celeb", "collect", "-w", "4"])
        );
        assert_eq!(rewrite_args(argv(&["celeb", "--help"])), argv(&["celeb", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["celeb", "lookup", "Eminem"])),
            argv(&["celeb", "lookup", "Eminem"])
        );
    }

    #[test]
    fn collect_args_become_config() {
        let cli = Cli::parse_from(argv(&[
            "celeb", "collect", "-w", "3", "--min-interval-ms", "250", "--policy", "fail-fast", "-n", "50",
        ]));
        let Command::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        let config = collect_config_from_args(&args).unwrap();
        assert_eq!(config.workers, 3);
        assert_eq!(config.min_interval, Duration::from_millis(250));
        assert_eq!(config.policy, AssemblyPolicy::FailFast);
        assert_eq!(config.limit, Some(50));
        assert_eq!(config.out_dir, std::path::PathBuf::from("data"));
    }

    #[test]
    fn list_accepts_names_flag() {
        let cli = Cli::parse_from(argv(&["celeb", "list", "--names", "--top", "5"]));
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert!(args.names);
        assert_eq!(args.top, Some(5));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let cli = Cli::parse_from(rewrite_args(argv(&["celeb", "--workers", "0"])));
        let Command::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        let err = collect_config_from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
    }
}
