use anyhow::Context;
use clap::{Parser, Subcommand};
use std::process::Command as ProcessCommand;

const FIXTURES_DIR: &str = "tests/fixtures";

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by legacyfix.
    PrintSchemas,
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
    /// Dry-run the CLI over every fixture input.
    Smoke,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", legacyfix_types::schema::LEGACYFIX_REPORT_V1);
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "legacyfix-domain", "--test", "golden_fixtures"])
                .env("LEGACYFIX_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
        Command::Smoke => {
            let status = ProcessCommand::new("cargo")
                .args(["run", "-p", "legacyfix", "--", "run", FIXTURES_DIR])
                .args(["--dry-run", "--skip", "expected.py"])
                .status()
                .context("run legacyfix smoke")?;
            if !status.success() {
                anyhow::bail!("smoke run failed");
            }
        }
    }
    Ok(())
}
