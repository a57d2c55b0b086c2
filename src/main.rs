// Mon Oct 19 2026 - Alex

use anyhow::Context;
use clap::{ArgAction, Parser};
use colored::Colorize;
use deep_assert::{
    assert::{AssertError, DeepAssert},
    config::AssertConfig,
    schema::{to_value, Schema},
    types::TypeRef,
    utils::{init_logger, scoped_timer},
    value::Value,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Deep structural equality of two JSON documents under a declared type", long_about = None)]
struct Args {
    /// Schema document declaring the types.
    #[arg(short, long)]
    schema: PathBuf,

    /// Target type expression, e.g. `Order` or `[Line]`.
    #[arg(short, long)]
    target: String,

    #[arg(short, long)]
    actual: PathBuf,

    #[arg(short, long)]
    expected: PathBuf,

    /// JSON file with assertion settings. Flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    label: Option<String>,

    #[arg(short, long)]
    message: Option<String>,

    /// Print the comparison trace.
    #[arg(long)]
    trace: bool,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "[!]".red(), e);
            return ExitCode::from(2);
        }
    };

    match run(&args, &config) {
        Ok(()) => {
            println!("{} {} matches expected", "[+]".green(), config.root_label.cyan());
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<AssertError>() {
            Some(failure) if failure.is_mismatch() => {
                eprintln!("{} {}", "[-]".red(), "Assertion failed".red().bold());
                eprintln!("{}", failure);
                ExitCode::from(1)
            }
            _ => {
                eprintln!("{} {:#}", "[!]".red(), e);
                ExitCode::from(2)
            }
        },
    }
}

fn load_config(args: &Args) -> anyhow::Result<AssertConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => AssertConfig::default(),
    };

    if let Some(label) = &args.label {
        config.root_label = label.clone();
    }
    if let Some(message) = &args.message {
        config.message = Some(message.clone());
    }
    config.trace |= args.trace;

    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

fn run(args: &Args, config: &AssertConfig) -> anyhow::Result<()> {
    let schema = Schema::from_path(&args.schema)
        .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;
    let target = schema
        .resolve(&args.target)
        .with_context(|| format!("Failed to resolve target type {}", args.target))?;

    let actual = load_document(&args.actual, &target)?;
    let expected = load_document(&args.expected, &target)?;

    let _timer = scoped_timer("comparison");
    let mut trace = String::new();
    let result = if config.trace {
        let outcome = DeepAssert::new(config.clone())
            .with_sink(&mut trace)
            .assert(Some(&target), &actual, &expected);
        println!("{}", trace.trim_end().dimmed());
        outcome
    } else {
        DeepAssert::new(config.clone()).assert(Some(&target), &actual, &expected)
    };
    result?;
    Ok(())
}

fn load_document(path: &Path, target: &TypeRef) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let json: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))?;
    let value = to_value(&json, target).with_context(|| format!("Failed to convert {}", path.display()))?;
    log::debug!("loaded {} as {}", path.display(), value.type_name());
    Ok(value)
}
