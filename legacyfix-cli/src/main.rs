mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig};
use fs_err as fs;
use legacyfix_core::adapters::{FsSourceTree, FsWritePort};
use legacyfix_core::{RunSettings, Translator, run_dir, write_run_artifacts};
use legacyfix_render::{file_label, render_summary_line};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "legacyfix",
    version,
    about = "Lexical Python 3 to Python 2.7 source translator."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate every source file under a directory, in place.
    Run(RunArgs),
    /// Translate one file to stdout (or in place).
    Translate(TranslateArgs),
    /// Dump the tokens of one file as JSON.
    Tokens(TokensArgs),
    /// List the fixers of a profile with their reliability.
    ListFixers(ListFixersArgs),
    /// Explain what a fixer rewrites and how far to trust it.
    Explain(ExplainArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Directory (or single file) to translate.
    #[arg(default_value = ".")]
    root: Utf8PathBuf,

    /// Names or paths to leave untouched (repeatable).
    #[arg(long)]
    skip: Vec<String>,

    /// File extensions to translate, without the dot (default: py).
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Built-in profile (legacy, legacy-print-function).
    #[arg(long)]
    profile: Option<String>,

    /// Only run fixers matching these patterns.
    #[arg(long)]
    enable: Vec<String>,

    /// Never run fixers matching these patterns.
    #[arg(long)]
    disable: Vec<String>,

    /// Translate in memory only; leave files untouched.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print a unified diff of the changes.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Print the run report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write report.json, report.md and patch.diff into this directory.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct TranslateArgs {
    file: Utf8PathBuf,

    /// Built-in profile (legacy, legacy-print-function).
    #[arg(long)]
    profile: Option<String>,

    /// Overwrite the file instead of printing to stdout.
    #[arg(long, default_value_t = false)]
    in_place: bool,
}

#[derive(Debug, Parser)]
struct TokensArgs {
    file: Utf8PathBuf,
}

#[derive(Debug, Parser)]
struct ListFixersArgs {
    /// Built-in profile (default: legacy).
    #[arg(long)]
    profile: Option<String>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Fixer key (e.g. "range", "unicode-literals").
    name: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    // stdout carries translated source and JSON, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Translate(args) => cmd_translate(args).map(|()| ExitCode::SUCCESS),
        Command::Tokens(args) => cmd_tokens(args).map(|()| ExitCode::SUCCESS),
        Command::ListFixers(args) => cmd_list_fixers(args).map(|()| ExitCode::SUCCESS),
        Command::Explain(args) => cmd_explain(args).map(|()| ExitCode::SUCCESS),
    }
}

fn merged_config(config_root: &Utf8Path, cli: &CliOverrides) -> anyhow::Result<MergedConfig> {
    let file_config =
        config::load_or_default(config_root).context("load legacyfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(cli)?;
    debug!(
        "merged config: profile={}, enable={:?}, disable={:?}, skip={:?}, extensions={:?}, marker={:?}",
        merged.profile, merged.enable, merged.disable, merged.skip, merged.extensions, merged.marker
    );
    Ok(merged)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let cli = CliOverrides {
        profile: args.profile,
        enable: args.enable,
        disable: args.disable,
        skip: args.skip,
        extensions: args.extensions,
    };
    let merged = merged_config(&args.root, &cli)?;
    let profile = merged.build_profile()?;

    let settings = RunSettings {
        root: args.root,
        skip: merged.skip_set(),
        extensions: merged.extensions.clone(),
        marker: merged.marker.clone(),
        dry_run: args.dry_run,
    };
    let outcome = run_dir(&settings, &profile, &FsSourceTree)
        .with_context(|| format!("translate {}", settings.root))?;

    if let Some(out_dir) = &args.out_dir {
        write_run_artifacts(&outcome, out_dir, &FsWritePort)
            .with_context(|| format!("write artifacts to {}", out_dir))?;
        info!("wrote run artifacts to {}", out_dir);
    }

    let report = &outcome.report;
    if args.json {
        println!("{}", serde_json::to_string_pretty(report).context("serialize report")?);
    } else if args.diff {
        print!("{}", outcome.patch);
    } else {
        for f in report.files.iter().filter(|f| f.edits > 0 || f.error.is_some()) {
            println!("{}: {}", f.path, file_label(f));
        }
        println!("{}", render_summary_line(&report.summary));
    }

    if report.has_failures() {
        for f in report.failures() {
            error!(
                "{}: {}",
                f.path,
                f.error.as_deref().unwrap_or("unknown error")
            );
        }
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_translate(args: TranslateArgs) -> anyhow::Result<()> {
    let cli = CliOverrides {
        profile: args.profile,
        ..CliOverrides::default()
    };
    let merged = merged_config(Utf8Path::new("."), &cli)?;
    let profile = merged.build_profile()?;

    let text = fs::read_to_string(&args.file).with_context(|| format!("read {}", args.file))?;
    let output = Translator::new(text)
        .with_name(args.file.as_str())
        .with_profile(profile)
        .into_output()?;

    if args.in_place {
        fs::write(&args.file, &output).with_context(|| format!("write {}", args.file))?;
        info!("translated {}", args.file);
    } else {
        print!("{output}");
    }
    Ok(())
}

fn cmd_tokens(args: TokensArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.file).with_context(|| format!("read {}", args.file))?;
    let tokens =
        legacyfix_lexer::tokenize(&text).with_context(|| format!("tokenize {}", args.file))?;

    let dump: Vec<_> = tokens
        .iter()
        .map(|t| {
            serde_json::json!({
                "kind": t.kind,
                "start": t.start,
                "end": t.end,
                "text": t.text(&text),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

fn cmd_list_fixers(args: ListFixersArgs) -> anyhow::Result<()> {
    let cli = CliOverrides {
        profile: args.profile,
        ..CliOverrides::default()
    };
    let profile = merged_config(Utf8Path::new("."), &cli)?.build_profile()?;

    match args.format {
        OutputFormat::Text => print!("{}", explain::render_fixer_table(&profile)),
        OutputFormat::Json => {
            let v = explain::fixer_list_json(&profile);
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let fixer = explain::find(&args.name)?;
    print!("{}", explain::render_explanation(fixer));
    Ok(())
}
