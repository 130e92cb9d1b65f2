use anyhow::Context;
use chrono::{Local, TimeZone};
use colored::Colorize;

use docseal_ledger::{BatchIngestor, BatchOutcome};
use docseal_store::ChainFile;

use crate::cli::*;
use crate::digest::file_digest;
use crate::scan::scan_directory;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let chain = ChainFile::new(&cli.ledger);
    match cli.command {
        Command::Notarize(args) => cmd_notarize(&chain, args),
        Command::Batch(args) => cmd_batch(&chain, args),
        Command::Check(args) => cmd_check(&chain, args),
        Command::Verify(_) => cmd_verify(&chain),
        Command::Log(args) => cmd_log(&chain, args),
    }
}

fn cmd_notarize(chain: &ChainFile, args: NotarizeArgs) -> anyhow::Result<()> {
    let digest = file_digest(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let mut ledger = chain.load()?;

    let (index, commitment, created_at) = {
        let entry = ledger.append(&digest)?;
        (entry.index(), *entry.commitment(), entry.created_at())
    };
    chain.save(&ledger)?;

    println!(
        "{} Notarized {} as entry {}",
        "✓".green().bold(),
        args.file.display().to_string().bold(),
        format!("#{index}").yellow()
    );
    println!("  Digest:     {digest}");
    println!("  Commitment: {commitment}");
    println!("  Timestamp:  {}", format_timestamp(created_at));
    Ok(())
}

fn cmd_batch(chain: &ChainFile, args: BatchArgs) -> anyhow::Result<()> {
    let items = scan_directory(&args.directory)
        .with_context(|| format!("cannot scan {}", args.directory.display()))?;
    let mut ledger = chain.load()?;

    let outcomes = BatchIngestor::run(&mut ledger, items);
    // One durable write for the whole batch.
    chain.save(&ledger)?;

    let mut accepted = 0usize;
    for outcome in &outcomes {
        match outcome {
            BatchOutcome::Accepted {
                identifier,
                index,
                commitment,
                ..
            } => {
                accepted += 1;
                println!(
                    "  {} {} → entry {} ({})",
                    "✓".green(),
                    identifier,
                    format!("#{index}").yellow(),
                    commitment.short_hex().dimmed()
                );
            }
            BatchOutcome::Rejected { identifier, reason } => {
                println!("  {} {} — {}", "✗".red(), identifier, reason.red());
            }
        }
    }
    println!(
        "{} {} of {} files notarized",
        "✓".green().bold(),
        accepted.to_string().bold(),
        outcomes.len()
    );
    Ok(())
}

fn cmd_check(chain: &ChainFile, args: CheckArgs) -> anyhow::Result<()> {
    let digest = file_digest(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let ledger = chain.load()?;

    match ledger.find_by_payload(&digest) {
        Some(found) => {
            println!(
                "{} Document is notarized (entry {})",
                "✓".green().bold(),
                format!("#{}", found.index).yellow()
            );
            println!("  Notarized at: {}", format_timestamp(found.created_at));
            println!("  Commitment:   {}", found.commitment);
            Ok(())
        }
        None => {
            println!("{} Document has not been notarized", "✗".red().bold());
            println!("  Digest: {digest}");
            std::process::exit(1);
        }
    }
}

fn cmd_verify(chain: &ChainFile) -> anyhow::Result<()> {
    let ledger = chain.load()?;
    match ledger.verify() {
        Ok(()) => {
            println!(
                "{} Chain intact ({} entries)",
                "✓".green().bold(),
                ledger.len().to_string().bold()
            );
            Ok(())
        }
        Err(violation) => {
            println!("{} {}", "✗".red().bold(), violation.to_string().red());
            Err(violation.into())
        }
    }
}

fn cmd_log(chain: &ChainFile, args: LogArgs) -> anyhow::Result<()> {
    let ledger = chain.load()?;
    for entry in ledger.entries().iter().rev().take(args.limit) {
        println!(
            "{}  {}  {}  {}",
            format!("#{}", entry.index()).yellow().bold(),
            entry.commitment().short_hex().dimmed(),
            format_timestamp(entry.created_at()),
            entry.payload()
        );
    }
    Ok(())
}

/// Render stored epoch seconds as local time for display.
fn format_timestamp(epoch_secs: f64) -> String {
    let secs = epoch_secs.trunc() as i64;
    let nanos = (epoch_secs.fract() * 1e9) as u32;
    match Local.timestamp_opt(secs, nanos) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => format!("{epoch_secs}"),
    }
}
