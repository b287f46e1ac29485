//! Promptdeck - Preset Prompt Toolkit
//!
//! Command-line host for deterministic preset prompt assembly.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use promptdeck::assembler::PromptAssembler;
use promptdeck::error::PresetError;
use promptdeck::request::{AssemblyRequest, DEFAULT_PREFIX_TAGS};
use promptdeck::schema::InputSchema;
use promptdeck::store::PresetStore;

#[derive(Parser)]
#[command(name = "promptdeck")]
#[command(author = "Preset Prompt Toolkit")]
#[command(version = "0.1.0")]
#[command(about = "Deterministic preset prompt assembly", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Preset file (defaults to ./presets.json, then the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    presets: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble one prompt and print it
    Generate {
        /// Preset to use
        #[arg(long, default_value = "None")]
        preset: String,

        /// Pick the preset at random (seed-stable) instead of --preset
        #[arg(long)]
        randomize: bool,

        /// Generator seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Leading tags, comma- or newline-separated
        #[arg(long, default_value = DEFAULT_PREFIX_TAGS)]
        prefix: String,

        /// Character tags
        #[arg(long, default_value = "")]
        character: String,

        /// Trailing tags, comma- or newline-separated
        #[arg(long, default_value = "")]
        suffix: String,

        /// Disable a category (repeatable)
        #[arg(long, value_name = "CATEGORY")]
        disable: Vec<String>,

        /// Output the full assembly report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List preset names
    Presets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the derived category order
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the host input schema for the loaded presets
    Schema {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Validate the preset file and report authoring problems
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing. Logs go to stderr so generate's stdout stays
    // exactly the assembled prompt.
    let filter = if cli.verbose {
        "promptdeck=debug,info"
    } else {
        "promptdeck=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let presets_path = resolve_presets_path(cli.presets.clone());

    match cli.command {
        Commands::Generate {
            preset,
            randomize,
            seed,
            prefix,
            character,
            suffix,
            disable,
            json,
        } => {
            let store = PresetStore::load(&presets_path);

            let mut request = AssemblyRequest::new()
                .with_seed(seed)
                .with_prefix_tags(prefix)
                .with_character(character)
                .with_suffix_tags(suffix);
            request = if randomize {
                request.with_randomized_preset()
            } else {
                request.with_preset(preset)
            };
            for category in disable {
                request = request.with_category_enabled(category, false);
            }

            let report = PromptAssembler::new(&store).assemble_report(&request);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.prompt);
            }
        }

        Commands::Presets { json } => {
            let store = PresetStore::load(&presets_path);

            if json {
                println!("{}", serde_json::to_string_pretty(&store.preset_names())?);
            } else {
                println!("\n{} Available Presets", "Presets:".cyan().bold());
                println!("{}", "─".repeat(40));
                for name in store.preset_names() {
                    println!("   {}", name);
                }
            }
        }

        Commands::Categories { json } => {
            let store = PresetStore::load(&presets_path);

            if json {
                println!("{}", serde_json::to_string_pretty(&store.categories())?);
            } else {
                println!("\n{} Category Order", "Categories:".cyan().bold());
                println!("{}", "─".repeat(40));
                if store.categories().is_empty() {
                    println!("   (none)");
                }
                for category in store.categories() {
                    println!("   {}", category);
                }
            }
        }

        Commands::Schema { pretty } => {
            let store = PresetStore::load(&presets_path);
            let schema = InputSchema::from_store(&store);

            if pretty {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                println!("{}", serde_json::to_string(&schema)?);
            }
        }

        Commands::Check => {
            let raw = match std::fs::read_to_string(&presets_path) {
                Ok(raw) => raw,
                Err(source) => {
                    let err = PresetError::resource_load(&presets_path, source);
                    eprintln!("{} {}", "Error:".red().bold(), err);
                    std::process::exit(err.exit_code());
                }
            };

            let store = match PresetStore::from_json_str(&raw) {
                Ok(store) => store,
                Err(err) => {
                    eprintln!("{} {}", "Error:".red().bold(), err);
                    std::process::exit(err.exit_code());
                }
            };

            println!(
                "{} {}: {} presets, {} categories",
                "OK".green().bold(),
                presets_path.display(),
                store.len(),
                store.categories().len()
            );

            let findings = store.lint();
            if findings.is_empty() {
                println!("{} No authoring problems found", "OK".green());
            } else {
                for finding in &findings {
                    println!("{} {}", "Warning:".yellow(), finding);
                }
                println!(
                    "\n{} authoring problem(s); assembly skips the affected entries",
                    findings.len()
                );
            }
        }
    }

    Ok(())
}

/// Pick the preset file to load: the flag wins, then `./presets.json`,
/// then the user config dir. Resolution only picks the path to try; a
/// file missing everywhere still degrades inside the loader.
fn resolve_presets_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }

    let local = PathBuf::from("presets.json");
    if local.exists() {
        return local;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let candidate = config_dir.join("promptdeck").join("presets.json");
        if candidate.exists() {
            return candidate;
        }
    }

    local
}
