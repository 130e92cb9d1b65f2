use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docseal",
    about = "DocSeal — tamper-evident document notarization ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the ledger file
    #[arg(long, global = true, default_value = "docseal.json")]
    pub ledger: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Notarize a single document
    Notarize(NotarizeArgs),
    /// Notarize every file under a directory in one batch
    Batch(BatchArgs),
    /// Check whether a document has been notarized
    Check(CheckArgs),
    /// Verify the integrity of the whole chain
    Verify(VerifyArgs),
    /// List notarized records, newest first
    Log(LogArgs),
}

#[derive(Args)]
pub struct NotarizeArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct BatchArgs {
    pub directory: PathBuf,
}

#[derive(Args)]
pub struct CheckArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct VerifyArgs {}

#[derive(Args)]
pub struct LogArgs {
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}
