use clap::{Args, Parser, Subcommand};

use anyhow::{Context, bail};
use opgraph::Result;
use opgraph::api::{self, MigrationPair};
use opgraph::contract::ProviderId;
use opgraph::diagnostics;
use opgraph::operation::{OperationList, OperationType};
use opgraph::render::{ExecutionResult, VisualizationFormat};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "opgraph")]
#[command(about = "Operation dependency resolver for test-management migrations", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct PairArgs {
    /// System the data is migrated from.
    #[arg(long, value_enum)]
    source: ProviderId,

    /// System the data is migrated to.
    #[arg(long, value_enum)]
    target: ProviderId,
}

impl PairArgs {
    fn pair(&self) -> MigrationPair {
        MigrationPair::new(self.source, self.target)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the operation definitions of a migration pair.
    Operations {
        #[command(flatten)]
        pair: PairArgs,
    },

    /// Print the dependency graph and its execution order.
    Graph {
        #[command(flatten)]
        pair: PairArgs,
    },

    /// Validate an operation list ({"operations": [...]}). Exits non-zero when invalid.
    Validate {
        #[arg(long)]
        file: String,
    },

    /// Render the dependency graph of a migration pair.
    Visualize {
        #[command(flatten)]
        pair: PairArgs,

        #[arg(long, value_enum, default_value_t = VisualizationFormat::Html)]
        format: VisualizationFormat,

        /// JSON array of execution results to include in the HTML report.
        #[arg(long)]
        results: Option<String>,

        /// Write the rendered document here instead of printing a JSON body.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Operations needed to reach a goal operation.
    MinimalSet {
        #[command(flatten)]
        pair: PairArgs,

        #[arg(long)]
        goal: OperationType,
    },

    /// Check invocation parameters ({"name": value, ...}) against a provider's rules.
    CheckParams {
        #[arg(long, value_enum)]
        provider: ProviderId,

        #[arg(long)]
        operation: OperationType,

        #[arg(long)]
        params: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(cli.verbose, cli.quiet);

    match cli.cmd {
        Commands::Operations { pair } => {
            print_json(&api::list_operations(pair.pair())?)?;
        }
        Commands::Graph { pair } => {
            print_json(&api::dependency_graph(pair.pair())?)?;
        }
        Commands::Validate { file } => {
            let list = OperationList::from_json(&read(&file)?)
                .with_context(|| diagnostics::error_message(format!("parse operations file {}", file)))?;
            let report = api::validate(&list);
            print_json(&report)?;
            if !report.valid {
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "{} failed validation with {} error(s)",
                        file,
                        report.errors.len()
                    ))
                );
            }
        }
        Commands::Visualize {
            pair,
            format,
            results,
            out,
        } => {
            let results = match results {
                Some(path) => Some(
                    ExecutionResult::list_from_json(&read(&path)?).with_context(|| {
                        diagnostics::error_message(format!("parse results file {}", path))
                    })?,
                ),
                None => None,
            };
            let resp = api::visualize(pair.pair(), format, results.as_deref())?;

            match out {
                Some(out) => {
                    std::fs::write(&out, &resp.visualization)
                        .with_context(|| diagnostics::error_message(format!("write {}", out)))?;
                    println!("Wrote {}", out);
                }
                None => print_json(&resp)?,
            }
        }
        Commands::MinimalSet { pair, goal } => {
            print_json(&api::minimal_set(pair.pair(), goal)?)?;
        }
        Commands::CheckParams {
            provider,
            operation,
            params,
        } => {
            let value: serde_json::Value = serde_json::from_str(&read(&params)?)
                .with_context(|| diagnostics::error_message(format!("parse params file {}", params)))?;
            let Some(map) = value.as_object() else {
                bail!(
                    "{}",
                    diagnostics::error_message(format!("{} must contain a JSON object", params))
                );
            };
            print_json(&api::check_params(provider, operation, map)?)?;
        }
    }

    Ok(())
}

fn read(path: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read {}", path)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
