//! @ai:module:intent CLI for the graphbench harness
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graphbench::{
    config::{GraphbenchConfig, ReportFormat},
    report::{load_session, ReportGenerator, SessionReport, SuiteOutcome},
    runner::BenchmarkSession,
    sink::{ConsoleSink, FanoutSink, JsonLinesSink},
    suites::SuiteRegistry,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_CONFIG_FILE: &str = "graphbench.toml";

#[derive(Parser)]
#[command(name = "graphbench")]
#[command(about = "Run priority-ordered, fail-fast benchmark suites and report their timings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmark suites
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run only these suites (comma-separated)
        #[arg(long)]
        suites: Option<String>,

        /// Run only suites whose name matches this regex
        #[arg(long)]
        pattern: Option<String>,

        /// Stop after the first suite that does not complete cleanly
        #[arg(long)]
        stop_on_failure: bool,

        /// Report formats to write (comma-separated: json, markdown, chart)
        #[arg(long)]
        formats: Option<String>,

        /// Append every run event as a JSON line to this file
        #[arg(long)]
        events_file: Option<PathBuf>,

        /// Output directory for results
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List registered suites
    List,

    /// Print the execution plan of a suite without running it
    Plan {
        /// Suite name
        suite: String,
    },

    /// Generate reports from an existing report.json
    Report {
        /// Path to results JSON file
        #[arg(short, long)]
        results: PathBuf,

        /// Output directory for reports
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

struct RunArgs {
    config: Option<PathBuf>,
    suites: Option<String>,
    pattern: Option<String>,
    stop_on_failure: bool,
    formats: Option<String>,
    events_file: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(2);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            suites,
            pattern,
            stop_on_failure,
            formats,
            events_file,
            output,
        } => run_suites(RunArgs {
            config,
            suites,
            pattern,
            stop_on_failure,
            formats,
            events_file,
            output,
        }),
        Commands::List => list_suites().map(|_| ExitCode::SUCCESS),
        Commands::Plan { suite } => print_plan(&suite),
        Commands::Report { results, output } => {
            generate_reports(results, output).map(|_| ExitCode::SUCCESS)
        }
        Commands::Init { output } => init_config(output).map(|_| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("graphbench=info".parse()?),
        )
        .init();
    Ok(())
}

/// @ai:intent Run the selected suites, write reports, exit 1 when any suite failed
/// @ai:effects fs:write, time, subject-defined
fn run_suites(args: RunArgs) -> Result<ExitCode> {
    let mut config = load_or_default_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args)?;

    let session = BenchmarkSession::from_config(SuiteRegistry::builtin(), &config.run)?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let output_dir = config.report.output_dir.join(timestamp.to_string());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    tracing::info!("Output directory: {}", output_dir.display());

    let mut sink = FanoutSink::new().with(ConsoleSink::new());

    if let Some(ref path) = config.report.events_file {
        sink = sink.with(JsonLinesSink::open(path)?);
    }

    let results = session.run(&mut sink);
    drop(sink);

    let reporter = ReportGenerator::new();
    reporter.generate_all(&results, &output_dir, &config.report.formats)?;

    print_summary(&results);

    if results.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// @ai:intent Let command-line flags win over the configuration file
/// @ai:effects pure
fn apply_overrides(config: &mut GraphbenchConfig, args: &RunArgs) -> Result<()> {
    if let Some(ref suites) = args.suites {
        config.run.filter.suites = Some(split_list(suites));
    }

    if let Some(ref pattern) = args.pattern {
        config.run.filter.pattern = Some(pattern.clone());
    }

    if args.stop_on_failure {
        config.run.continue_on_failure = false;
    }

    if let Some(ref formats) = args.formats {
        config.report.formats = split_list(formats)
            .iter()
            .map(|f| f.parse::<ReportFormat>())
            .collect::<Result<Vec<_>>>()?;
    }

    if let Some(ref events_file) = args.events_file {
        config.report.events_file = Some(events_file.clone());
    }

    if let Some(ref output) = args.output {
        config.report.output_dir = output.clone();
    }

    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// @ai:intent List registered suites
/// @ai:effects io
fn list_suites() -> Result<()> {
    let registry = SuiteRegistry::builtin();

    println!("Available suites ({}):", registry.len());
    println!();
    println!("{:<20} {:<12} {}", "Name", "Benchmarks", "Description");
    println!("{}", "-".repeat(70));

    for entry in registry.iter() {
        let benchmarks = match entry.prepare() {
            Ok(prepared) => prepared.plan.len().to_string(),
            Err(_) => "invalid".to_string(),
        };
        println!("{:<20} {:<12} {}", entry.name, benchmarks, entry.description);
    }

    Ok(())
}

/// @ai:intent Print the validated plan of a suite; exit 1 when it fails validation
/// @ai:effects io
fn print_plan(suite: &str) -> Result<ExitCode> {
    let registry = SuiteRegistry::builtin();
    let entry = registry.find(suite).with_context(|| {
        format!(
            "Unknown suite: {} (available: {})",
            suite,
            registry.names().join(", ")
        )
    })?;

    let prepared = match entry.prepare() {
        Ok(prepared) => prepared,
        Err(e) => {
            println!("{}: {}", suite, e);
            return Ok(ExitCode::from(1));
        }
    };

    println!("Execution plan for {}:", suite);
    println!();

    if let Some(ref setup) = prepared.setup {
        println!("  setup     {}", setup.name);
    }

    println!("  {:<4} {:<45} {:>8} {:>10}", "#", "Benchmark", "Priority", "Iterations");
    for (position, benchmark) in prepared.plan.iter().enumerate() {
        println!(
            "  {:<4} {:<45} {:>8} {:>10}",
            position + 1,
            benchmark.name,
            benchmark.priority,
            benchmark.iteration_count
        );
    }

    if let Some(ref teardown) = prepared.teardown {
        println!("  teardown  {}", teardown.name);
    }

    println!();
    println!("Total iterations: {}", prepared.plan.total_iterations());
    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Generate reports from existing results
/// @ai:effects fs:read, fs:write
fn generate_reports(results_path: PathBuf, output_dir: PathBuf) -> Result<()> {
    let results = load_session(&results_path)?;

    let reporter = ReportGenerator::new();
    let written = reporter.generate_all(
        &results,
        &output_dir,
        &[ReportFormat::Markdown, ReportFormat::Chart],
    )?;

    println!(
        "Reports generated in {}: {}",
        output_dir.display(),
        written.join(", ")
    );
    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = GraphbenchConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<&Path>) -> Result<GraphbenchConfig> {
    match path {
        Some(p) => GraphbenchConfig::load(p),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                GraphbenchConfig::load(default_path)
            } else {
                Ok(GraphbenchConfig::default())
            }
        }
    }
}

/// @ai:intent Print per-suite status and timings to stdout
/// @ai:effects io
fn print_summary(results: &SessionReport) {
    println!();
    println!("Graphbench Results");
    println!("==================");
    println!();

    for outcome in &results.suites {
        match outcome {
            SuiteOutcome::Ran { suite, report } => {
                println!("{} ({}): {}", suite, report.subject, report.status);
                println!("{}", "-".repeat(72));
                println!("{:<45} {:>10} {:>14}", "Operation", "Iterations", "Total (ms)");

                for record in &report.records {
                    println!(
                        "{:<45} {:>10} {:>14}",
                        record.operation,
                        format!("{}/{}", record.executed_iterations(), record.iteration_count),
                        record.total_ms()
                    );
                }

                for error in &report.errors {
                    println!("  ! {}", error);
                }
            }
            SuiteOutcome::Rejected { suite, error } => {
                println!("{}: rejected", suite);
                println!("  ! {}", error);
            }
        }
        println!();
    }

    println!(
        "{} suite(s), {} failed",
        results.suites.len(),
        results.failed_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_args(config: Option<PathBuf>) -> RunArgs {
        RunArgs {
            config,
            suites: Some("social-graph, other".to_string()),
            pattern: None,
            stop_on_failure: true,
            formats: Some("json,md".to_string()),
            events_file: None,
            output: Some(PathBuf::from("out")),
        }
    }

    #[test]
    fn test_flags_override_loaded_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        GraphbenchConfig::default().save(&path).unwrap();

        let args = run_args(Some(path));
        let mut config = load_or_default_config(args.config.as_deref()).unwrap();
        apply_overrides(&mut config, &args).unwrap();

        assert_eq!(
            config.run.filter.suites,
            Some(vec!["social-graph".to_string(), "other".to_string()])
        );
        assert!(!config.run.continue_on_failure);
        assert_eq!(config.report.formats, vec![ReportFormat::Json, ReportFormat::Markdown]);
        assert_eq!(config.report.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_unknown_format_flag_rejected() {
        let mut args = run_args(None);
        args.formats = Some("pdf".to_string());

        let mut config = GraphbenchConfig::default();
        assert!(apply_overrides(&mut config, &args).is_err());
    }
}
