//! Pattern call query CLI.
//!
//! # Responsibility
//! - Demonstrate repository and query service wiring on sample data.
//! - Load, query and re-save pattern call files from the command line.

use clap::{Args, Parser, Subcommand};
use log::info;
use patternquery_core::{
    default_log_level, init_logging, InMemoryPatternCallRepository, LoggingConfig, PatternCall,
    PatternCallId, PatternCallQueryService, PatternCallRepository,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

/// Pattern call query tool
#[derive(Parser)]
#[command(name = "patternquery", version)]
#[command(about = "Query pattern call records kept in comma-separated files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PATTERNQUERY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "PATTERNQUERY_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries against built-in sample records (default)
    Demo,
    /// Load a file and print matching records
    Query(QueryArgs),
    /// Load a file and write it back in normalized form
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Pattern call file to load
    #[arg(long)]
    file: PathBuf,
    #[arg(long, group = "filter", allow_negative_numbers = true)]
    id: Option<PatternCallId>,
    #[arg(long, group = "filter")]
    name: Option<String>,
    #[arg(long, group = "filter")]
    path: Option<String>,
    /// Only records whose pattern was called
    #[arg(long, group = "filter")]
    called: bool,
    /// Only records whose pattern was skipped
    #[arg(long, group = "filter")]
    skipped: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = setup_logging(&cli) {
        eprintln!("Error initializing logging: {err}");
        process::exit(1);
    }

    let result = match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => Ok(run_demo()),
        Commands::Query(args) => run_query(&args),
        Commands::Convert { input, output } => run_convert(&input, &output),
    };

    match result {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

fn setup_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let Some(log_dir) = cli.log_dir.as_ref() else {
        return Ok(());
    };
    let log_dir = if log_dir.is_absolute() {
        log_dir.clone()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(LoggingConfig::new(level, log_dir)?)?;
    Ok(())
}

fn sample_repository() -> InMemoryPatternCallRepository {
    let mut repo = InMemoryPatternCallRepository::new();
    repo.add_pattern_call(PatternCall::new(42, "myPattern", "src/patterns/Functional.pat", false));
    repo.add_pattern_call(PatternCall::new(43, "anotherPattern", "src/patterns/Another.pat", true));
    repo.add_pattern_call(PatternCall::new(44, "myPattern", "src/patterns/MyPattern.pat", true));
    repo.add_pattern_call(PatternCall::new(45, "thirdPattern", "src/patterns/Third.pat", false));
    repo
}

fn run_demo() -> String {
    let service = PatternCallQueryService::new(sample_repository());
    let mut out = String::new();

    match service.get_pattern_call_by_id(42) {
        Some(call) => out.push_str(&format!("Retrieved by ID 42: {}\n", call.name())),
        None => out.push_str("No pattern call with ID 42\n"),
    }

    out.push_str("Pattern calls with name 'myPattern':\n");
    for call in service.get_pattern_calls_by_name("myPattern") {
        out.push_str(&format!(
            " - ID: {}, File: {}, Called: {}\n",
            call.id(),
            call.pattern_file(),
            call.is_called()
        ));
    }

    out.push_str("Pattern calls with path 'src/patterns/Another.pat':\n");
    for call in service.get_pattern_calls_by_path("src/patterns/Another.pat") {
        out.push_str(&format!(
            " - ID: {}, Name: {}, Called: {}\n",
            call.id(),
            call.name(),
            call.is_called()
        ));
    }

    out.push_str("Skipped Pattern Calls:\n");
    for call in service.get_skipped_pattern_calls() {
        out.push_str(&format!(" - ID: {}, Name: {}\n", call.id(), call.name()));
    }

    out.push_str("Called Pattern Calls:\n");
    for call in service.get_called_pattern_calls() {
        out.push_str(&format!(" - ID: {}, Name: {}\n", call.id(), call.name()));
    }
    out
}

fn run_query(args: &QueryArgs) -> Result<String, Box<dyn Error>> {
    let mut repo = InMemoryPatternCallRepository::new();
    let report = repo.read_from_file(&args.file)?;
    info!(
        "event=cli_query module=cli status=loaded accepted={}",
        report.accepted
    );
    let service = PatternCallQueryService::new(repo);

    let matches: Vec<&PatternCall> = if let Some(id) = args.id {
        service.get_pattern_call_by_id(id).into_iter().collect()
    } else if let Some(name) = args.name.as_deref() {
        service.get_pattern_calls_by_name(name)
    } else if let Some(path) = args.path.as_deref() {
        service.get_pattern_calls_by_path(path)
    } else if args.called {
        service.get_called_pattern_calls()
    } else if args.skipped {
        service.get_skipped_pattern_calls()
    } else {
        service.repository().get_pattern_calls().iter().collect()
    };

    let mut out = String::new();
    push_section(&mut out, &format!("{} match(es):", matches.len()), &matches);
    Ok(out)
}

fn run_convert(input: &Path, output: &Path) -> Result<String, Box<dyn Error>> {
    let mut repo = InMemoryPatternCallRepository::new();
    let report = repo.read_from_file(input)?;
    repo.write_to_file(output)?;
    Ok(format!(
        "Wrote {} record(s) to {} ({} malformed, {} duplicate line(s) skipped)\n",
        repo.len(),
        output.display(),
        report.skipped_malformed,
        report.skipped_duplicate
    ))
}

fn push_section(out: &mut String, title: &str, calls: &[&PatternCall]) {
    out.push_str(title);
    out.push('\n');
    for call in calls {
        out.push_str(&format!("  {call}\n"));
    }
}
