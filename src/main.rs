use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use serviceability_workshop::calc::{self, ServiceabilityClient};
use serviceability_workshop::changelog::{render_text, ChangeSummary, FieldPath};
use serviceability_workshop::edit::{command_for, Command};
use serviceability_workshop::model::format::{format_currency, format_signed_currency};
use serviceability_workshop::model::io::{
    read_application, read_scenario, to_pretty_json, write_scenario_atomic,
};
use serviceability_workshop::{init_tracing, Scenario, ScenarioLibrary, Workshop, WorkshopConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "workshop: serviceability scenario editor",
    long_about = None
)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Apply edits to a baseline and show what changed",
        after_help = "EXAMPLES:\n    workshop edit --baseline application.json --set loan.loanAmount=850000\n\n    workshop edit --baseline baseline.json --working current.json --edits edits.json --recalc"
    )]
    Edit(EditArgs),

    #[command(subcommand, about = "Manage saved scenarios")]
    Scenarios(ScenarioCommands),

    #[command(subcommand, about = "Manage the calculation service API key")]
    ApiKey(ApiKeyCommands),
}

#[derive(clap::Args, Debug)]
struct EditArgs {
    /// Application or scenario JSON to compare against.
    #[arg(long)]
    baseline: PathBuf,

    /// Saved working scenario to continue from.
    #[arg(long)]
    working: Option<PathBuf>,

    /// JSON array of commands to apply in order.
    #[arg(long)]
    edits: Option<PathBuf>,

    /// Single field edit as `<path>=<value>`, e.g. `loan.loanAmount=850000`.
    #[arg(long = "set", value_name = "PATH=VALUE")]
    sets: Vec<String>,

    /// Recalculate with the serviceability service after editing.
    #[arg(long)]
    recalc: bool,

    /// Save the result to the scenario library under this name.
    #[arg(long)]
    save: Option<String>,

    /// Write the result to a scenario JSON file.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Show the full change log instead of net changes.
    #[arg(long)]
    all: bool,
}

#[derive(Subcommand, Debug)]
enum ScenarioCommands {
    /// List saved scenarios, newest first.
    List,
    /// Show one saved scenario.
    Show { id: String },
    /// Delete a saved scenario.
    Delete { id: String },
    /// Write a saved scenario to a JSON file.
    Export { id: String, path: PathBuf },
    /// Add a scenario JSON file to the library.
    Import { path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ApiKeyCommands {
    /// Store the API key in the OS keychain.
    Set { key: String },
    /// Remove the stored API key.
    Delete,
    /// Report whether a key is stored.
    Status,
}

/// A scenario file is used as-is; a bare application becomes a new baseline
/// named after the file.
fn load_baseline(path: &Path) -> Result<Scenario> {
    if let Ok(scenario) = read_scenario(path) {
        return Ok(scenario);
    }
    let application = read_application(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Baseline".to_string());
    Ok(Scenario::baseline(name, application, None))
}

fn parse_set(raw: &str) -> Result<Command> {
    let (path, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected <path>=<value>, got '{}'", raw))?;
    let path: FieldPath = path.trim().parse()?;
    Ok(command_for(&path, value)?)
}

fn print_summary(summary: &ChangeSummary, stale: bool) {
    println!(
        "Surplus: {} -> {} ({}){}",
        format_currency(summary.baseline_surplus),
        format_currency(summary.current_surplus),
        format_signed_currency(summary.total_impact),
        if stale { " [stale]" } else { "" }
    );
    for category in summary.categories.iter().filter(|c| c.count > 0) {
        println!(
            "  {:<10} {:>3} changes, est. impact {}",
            category.category.as_str(),
            category.count,
            format_signed_currency(category.impact)
        );
    }
}

async fn run_edit(args: EditArgs, config: &WorkshopConfig, json_output: bool) -> Result<()> {
    let baseline = load_baseline(&args.baseline)?;
    let estimator = config.impact_estimator()?;

    let mut workshop = match &args.working {
        Some(path) => Workshop::resume(baseline, read_scenario(path)?),
        None => Workshop::new(baseline),
    };
    workshop.set_estimator(estimator);

    if let Some(path) = &args.edits {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read edits file {:?}", path))?;
        let commands: Vec<Command> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid edits JSON in {:?}", path))?;
        info!("Applying {} commands from {:?}", commands.len(), path);
        for command in commands {
            workshop.apply(command)?;
        }
    }
    for raw in &args.sets {
        workshop.apply(parse_set(raw)?)?;
    }

    if args.recalc {
        let key = calc::get_api_key(&config.api.keyring_service)?
            .context("No API key stored; run `workshop api-key set <key>` first")?;
        let client = ServiceabilityClient::new(&config.api, key)?;
        workshop.recalculate(&client).await?;
    }

    let entries = if args.all {
        workshop.change_log().to_vec()
    } else {
        workshop.net_changes()
    };
    let summary = workshop.summary();

    if json_output {
        let output = json!({
            "changes": entries,
            "summary": summary,
            "resultStale": workshop.is_result_stale(),
        });
        print!("{}", to_pretty_json(&output)?);
    } else {
        if entries.is_empty() {
            println!("No changes from baseline.");
        } else {
            println!("{}", render_text(&entries));
        }
        println!();
        print_summary(&summary, workshop.is_result_stale());
    }

    if args.save.is_some() || args.export.is_some() {
        let name = args
            .save
            .clone()
            .unwrap_or_else(|| format!("{} (edited)", workshop.baseline().name));
        let scenario = workshop.snapshot(name);
        if args.save.is_some() {
            let library = ScenarioLibrary::new(&config.library_path())?;
            let id = library.save(&scenario)?;
            eprintln!("Saved scenario {}", id);
        }
        if let Some(path) = &args.export {
            write_scenario_atomic(&scenario, path)?;
            eprintln!("Exported scenario to {}", path.display());
        }
    }
    Ok(())
}

fn run_scenarios(command: ScenarioCommands, config: &WorkshopConfig, json_output: bool) -> Result<()> {
    let library = ScenarioLibrary::new(&config.library_path())?;
    match command {
        ScenarioCommands::List => {
            let scenarios = library.list()?;
            if json_output {
                print!("{}", to_pretty_json(&scenarios)?);
            } else if scenarios.is_empty() {
                println!("No saved scenarios.");
            } else {
                for s in scenarios {
                    println!(
                        "{}  {:<32} {:>3} changes  {}{}",
                        s.id,
                        s.name,
                        s.change_count,
                        s.updated_at.format("%Y-%m-%d %H:%M"),
                        if s.is_baseline { "  (baseline)" } else { "" }
                    );
                }
            }
        }
        ScenarioCommands::Show { id } => {
            let scenario = library.get(&id)?;
            if json_output {
                print!("{}", to_pretty_json(&scenario)?);
            } else {
                println!("{} ({})", scenario.name, scenario.id);
                if let Some(surplus) = scenario.surplus() {
                    println!("Net surplus: {}", format_currency(surplus));
                }
                println!("{}", render_text(&scenario.change_log));
            }
        }
        ScenarioCommands::Delete { id } => {
            library.delete(&id)?;
            eprintln!("Deleted scenario {}", id);
        }
        ScenarioCommands::Export { id, path } => {
            write_scenario_atomic(&library.get(&id)?, &path)?;
            eprintln!("Exported scenario {} to {}", id, path.display());
        }
        ScenarioCommands::Import { path } => {
            let id = library.save(&read_scenario(&path)?)?;
            eprintln!("Imported scenario {}", id);
        }
    }
    Ok(())
}

fn run_api_key(command: ApiKeyCommands, config: &WorkshopConfig) -> Result<()> {
    let service = &config.api.keyring_service;
    match command {
        ApiKeyCommands::Set { key } => {
            if key.trim().is_empty() {
                bail!("API key must not be blank");
            }
            calc::set_api_key(service, key.trim())?;
            eprintln!("API key stored");
        }
        ApiKeyCommands::Delete => {
            calc::delete_api_key(service)?;
            eprintln!("API key removed");
        }
        ApiKeyCommands::Status => match calc::get_api_key(service)? {
            Some(_) => println!("API key stored for {}", service),
            None => println!("No API key stored for {}", service),
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = WorkshopConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Edit(args) => run_edit(args, &config, cli.json).await,
        Commands::Scenarios(command) => run_scenarios(command, &config, cli.json),
        Commands::ApiKey(command) => run_api_key(command, &config),
    }
}
