//! CLI for preprocessing conditional XAML
//!
//! ```text
//! xcc process --symbols "WINDOWS_APP;DEBUG" --output-dir obj/xcc Views/MainPage.xaml
//! xcc task --manifest xcc.json --output task-output.json
//! xcc eval --symbols DEBUG condition:DEBUG condition:!DEBUG
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use xcc_engine::{ConditionEvaluator, OutputNamespace, PreprocessTask, SymbolSet, TaskItem};

#[derive(Debug, Parser)]
#[command(name = "xcc", version, about = "Conditional compilation for XAML documents")]
struct Cli {
    /// Log every resolved element and attribute
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Preprocess XAML pages into an output directory
    Process(ProcessArgs),
    /// Run a build task described by a JSON manifest
    Task(TaskArgs),
    /// Show how condition namespaces evaluate for a symbol list
    Eval(EvalArgs),
}

#[derive(Debug, Args)]
struct ProcessArgs {
    /// Defined symbols, separated by `;`
    #[arg(short, long, default_value = "")]
    symbols: String,

    /// Directory the changed files are written to
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Strip namespaces listed in mc:Ignorable
    #[arg(long)]
    remove_ignorable_content: bool,

    /// `root-default`, `presentation`, or a namespace URI
    #[arg(long, default_value = "root-default")]
    output_namespace: String,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    format: ReportFormat,

    /// XAML files to preprocess
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct TaskArgs {
    /// JSON task manifest
    #[arg(short, long)]
    manifest: PathBuf,

    /// Write the task output (new item groups and report) here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EvalArgs {
    /// Defined symbols, separated by `;`
    #[arg(short, long, default_value = "")]
    symbols: String,

    /// Namespace names such as `condition:!DEBUG`
    #[arg(required = true)]
    namespaces: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Json,
    Markdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Process(args) => process(args),
        Command::Task(args) => task(args),
        Command::Eval(args) => eval(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn process(args: ProcessArgs) -> Result<()> {
    let task = PreprocessTask {
        defined_symbols: args.symbols,
        pages: args
            .files
            .iter()
            .map(|file| TaskItem::new(file.to_string_lossy()))
            .collect(),
        output_path: args.output_dir,
        remove_ignorable_content: args.remove_ignorable_content,
        output_namespace: OutputNamespace::from(args.output_namespace.as_str()),
        ..PreprocessTask::default()
    };

    let output = task.execute().context("preprocessing failed")?;
    match args.format {
        ReportFormat::Json => println!("{}", output.report.to_json()),
        ReportFormat::Markdown => print!("{}", output.report.to_markdown()),
    }
    Ok(())
}

fn task(args: TaskArgs) -> Result<()> {
    let task = PreprocessTask::from_json_file(&args.manifest)
        .with_context(|| format!("cannot load manifest {}", args.manifest.display()))?;
    let output = task.execute().context("preprocessing failed")?;
    let json = serde_json::to_string_pretty(&output)?;

    match args.output {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn eval(args: EvalArgs) -> Result<()> {
    let mut evaluator = ConditionEvaluator::new(SymbolSet::parse(&args.symbols));
    for namespace in &args.namespaces {
        let verdict = match evaluator.evaluate(namespace) {
            Some(true) => "include",
            Some(false) => "exclude",
            None => "not a condition",
        };
        println!("{}\t{}", namespace, verdict);
    }
    Ok(())
}
