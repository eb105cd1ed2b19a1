#![allow(non_snake_case)]
use SolverCoeffs::Utils::config::GeneratorConfig;
use SolverCoeffs::Utils::logger::init_logger;
use SolverCoeffs::codegen::common_factor::simplify;
use SolverCoeffs::codegen::term_extractor::{extract_with_key, or_zero};
use SolverCoeffs::drivers::{SolverKind, generate};
use SolverCoeffs::error::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use strum::IntoEnumIterator;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate coefficient assignments for one solver, or for all of them
    Generate {
        /// Solver name (see `list`) or `all`
        solver: String,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output directory, overrides the configuration
        #[arg(long)]
        out: Option<PathBuf>,
        /// Emit the extracted coefficients without common-factor extraction
        #[arg(long)]
        no_simplify: bool,
    },
    /// List the available solvers
    List,
    /// Print the coefficient of a monomial key in an expanded polynomial
    Extract {
        /// Expanded polynomial, e.g. "x^2*y - 3*x*y + x^2 - y"
        poly: String,
        /// Monomial key, e.g. "x^2"
        key: String,
    },
    /// Factor common symbols out of an expanded sum
    Simplify {
        /// Expanded sum, e.g. "a*b + a*c - a*d"
        expr: String,
    },
}

#[derive(Tabled)]
struct SolverRow {
    name: String,
    slots: usize,
    target: String,
    description: &'static str,
}

fn list_solvers() -> String {
    let rows: Vec<SolverRow> = SolverKind::iter()
        .map(|kind| {
            let (target, field) = kind.target();
            SolverRow {
                name: kind.to_string(),
                slots: kind.slot_count(),
                target: format!("{}.{}[]", target, field),
                description: kind.description(),
            }
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

fn run_generate(
    solver: &str,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    no_simplify: bool,
) -> Result<()> {
    let mut config = match config {
        Some(path) => GeneratorConfig::from_file(&path)?,
        None => GeneratorConfig::default(),
    };
    init_logger(config.log_level, config.log_file.as_deref());
    if let Some(dir) = out {
        config.output_dir = dir;
    }
    if no_simplify {
        config.simplify = false;
        for solver_config in config.solvers.values_mut() {
            solver_config.simplify = Some(false);
        }
    }

    let kinds: Vec<SolverKind> = if solver == "all" {
        SolverKind::iter()
            .filter(|kind| {
                let enabled = config.solver(*kind).enabled;
                if !enabled {
                    info!("{} disabled in the configuration, skipped", kind);
                }
                enabled
            })
            .collect()
    } else {
        let kind = SolverKind::from_name(solver)?;
        if !config.solver(kind).enabled {
            warn!("{} is disabled in the configuration but was asked for explicitly", kind);
        }
        vec![kind]
    };

    for kind in kinds {
        let file = generate(kind, &config.driver_options(kind))?;
        file.write_to(&config.output_path(kind))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Generate {
            solver,
            config,
            out,
            no_simplify,
        } => run_generate(&solver, config, out, no_simplify),
        Commands::List => {
            println!("{}", list_solvers());
            Ok(())
        }
        Commands::Extract { poly, key } => {
            println!("{}", or_zero(&extract_with_key(&poly, &key)));
            Ok(())
        }
        Commands::Simplify { expr } => {
            println!("{}", simplify(&expr));
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
