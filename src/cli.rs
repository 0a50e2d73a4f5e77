// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `dagpool`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dagpool",
    version,
    about = "Run bulk task workloads on a dependency-aware worker pool.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the workload file (TOML).
    ///
    /// Default: `Dagpool.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Dagpool.toml")]
    pub workload: String,

    /// Executor to run the workload on (serial, spawn, spin, pool).
    ///
    /// If omitted, `[config].executor` from the workload file is used.
    #[arg(long, value_enum, value_name = "KIND")]
    pub executor: Option<ExecutorArg>,

    /// Worker thread count for the pooled executors.
    ///
    /// If omitted, `[config].workers` from the workload file is used.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Run the workload once on every executor and print a timing line
    /// for each.
    #[arg(long)]
    pub compare: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DAGPOOL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the workload, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Executor selection as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum ExecutorArg {
    Serial,
    Spawn,
    Spin,
    Pool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
