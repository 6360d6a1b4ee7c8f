//! Include Guardian CLI - command-line interface for the dependency checker
//!
//! Translates the command line into one checker run: validates the root
//! path, drives the fixed-order layer scan, renders the report, and maps
//! the result to a process exit code.

use clap::{Parser, ValueEnum};
use include_guardian::{CheckerResult, DependencyChecker, Layer, OutputFormat, ReportFormatter};
use std::path::PathBuf;
use std::process;

/// Include Guardian - layered-architecture dependency enforcement
#[derive(Parser)]
#[command(name = "include-guardian")]
#[command(version = "0.1.0")]
#[command(about = "Enforces clean-architecture include rules across a C/C++ source tree")]
#[command(
    long_about = "Include Guardian scans the domain, abstractions, and application \
                  subdirectories of <root>/src for #include directives that cross \
                  architectural boundaries. Exit code 1 when violations are found, \
                  making it suitable as a build gate."
)]
struct Cli {
    /// Project root path (expects a src/ subdirectory)
    root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::Github,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_check(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_check(cli: Cli) -> CheckerResult<i32> {
    // The root is optional at the clap level so that a missing argument
    // prints the usage line to stdout and exits 1, not clap's exit 2.
    let root = match cli.root {
        Some(root) => root,
        None => {
            println!("Usage: include-guardian <project_root_path>");
            return Ok(1);
        }
    };

    if !root.exists() {
        println!("Error: Path does not exist: {}", root.display());
        return Ok(1);
    }

    let format: OutputFormat = cli.format.into();
    let formatter = ReportFormatter::new();
    let mut checker = DependencyChecker::new(&root)?;

    // Banner and progress lines belong to the human contract only.
    if format == OutputFormat::Human {
        println!("{}", formatter.format_header(checker.src_path()));
    }

    for layer in Layer::ALL {
        if format == OutputFormat::Human {
            println!("{}", formatter.format_progress(layer));
        }
        checker.scan_layer(layer);
    }

    let report = checker.into_report();
    let exit_code = report.exit_code();

    let formatted = formatter.format_report(&report, format)?;
    if !formatted.is_empty() {
        println!("{formatted}");
    }

    Ok(exit_code)
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli(root: Option<PathBuf>, format: OutputFormatArg) -> Cli {
        Cli { root, format, verbose: false }
    }

    #[test]
    fn test_missing_argument_exits_one() {
        let result = run_check(cli(None, OutputFormatArg::Human));
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_nonexistent_root_exits_one() {
        let result = run_check(cli(
            Some(PathBuf::from("/definitely/not/a/real/path")),
            OutputFormatArg::Human,
        ));
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_clean_tree_exits_zero() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("src/domain");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Entity.h"), "#include <vector>\n").unwrap();

        let result = run_check(cli(Some(temp_dir.path().to_path_buf()), OutputFormatArg::Human));
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_violating_tree_exits_one() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("src/application");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("UseCase.h"), "#include \"Adapters/Thing.h\"\n").unwrap();

        let result = run_check(cli(Some(temp_dir.path().to_path_buf()), OutputFormatArg::Json));
        assert_eq!(result.unwrap(), 1);
    }
}
