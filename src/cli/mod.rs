//! Command line interface
//!
//! `serve` (the default when no subcommand is given) runs the HTTP API.

pub mod serve;

use clap::{Parser, Subcommand};

/// LLM Model Registry - CRUD API for LLM endpoint configurations
#[derive(Debug, Parser)]
#[command(name = "llm-model-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),
}
