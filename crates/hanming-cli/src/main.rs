use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use hanming_ai::{
    AnalysisNotifier, AnalysisOrchestrator, AnalysisTab, CharacterExplorer,
    CompletionProviderFactory, CulturalContextPanel, MeaningNetworkPanel, NameGenerator,
    PresentationAdapter, SemanticModel, UserFacingError,
};
use hanming_core::{ConfigManager, HanmingConfig, HanmingError, LoggingConfig, NameProfile};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::{filter::EnvFilter, fmt::MakeWriter, layer::SubscriberExt, Registry};

#[derive(Parser)]
#[command(name = "hanming")]
#[command(about = "Hanming - Chinese name generation and analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (pretty, json)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Explicit config file
    #[arg(short, long, global = true, env = "HANMING_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Linguistic,
    Cultural,
    Semantic,
    Modern,
    Visual,
}

impl From<TabArg> for AnalysisTab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Linguistic => AnalysisTab::Linguistic,
            TabArg::Cultural => AnalysisTab::Cultural,
            TabArg::Semantic => AnalysisTab::Semantic,
            TabArg::Modern => AnalysisTab::Modern,
            TabArg::Visual => AnalysisTab::Visual,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the comprehensive analysis of a name
    Analyze {
        /// Name to analyze
        name: String,

        /// Also show the content of these tabs
        #[arg(short, long, value_enum, value_delimiter = ',')]
        tab: Vec<TabArg>,
    },

    /// Explore a single character
    Character {
        /// One Chinese character
        character: String,
    },

    /// Characters related to a single character
    Related {
        /// One Chinese character
        character: String,
    },

    /// Historical, literary and modern context of a name
    Culture {
        /// Name to analyze
        name: String,
    },

    /// Meaning network around a character
    Network {
        /// One Chinese character
        character: String,
    },

    /// Generate a Chinese name from personal parameters
    Generate {
        /// Original (e.g. non-Chinese) name
        #[arg(long)]
        original_name: String,

        /// Personality trait (repeatable)
        #[arg(long = "trait")]
        traits: Vec<String>,

        /// Interest (repeatable)
        #[arg(long = "interest")]
        interests: Vec<String>,

        /// Cultural preference, e.g. traditional or modern
        #[arg(long)]
        preference: Option<String>,

        /// Family background
        #[arg(long)]
        background: Option<String>,
    },

    /// Local semantic breakdown and composition scores
    Semantic {
        /// Name to score
        name: String,
    },

    /// Semantic similarity of two names
    Similarity {
        first: String,
        second: String,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to ~/.hanming/config.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimilarityResult {
    first: String,
    second: String,
    similarity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitConfigResult {
    path: String,
    status: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { path } = &cli.command {
        let output = init_config(path.as_deref())?;
        return print_output(&cli.output, &output);
    }

    let config = load_config(cli.config.as_deref(), cli.verbose)?;

    init_tracing(&config.logging, cli.verbose);

    match execute_command(&cli, &config).await {
        Ok(output) => {
            print_output(&cli.output, &output)?;
            Ok(())
        }
        Err(e) => {
            if let Some(error @ HanmingError::InvalidInput(_)) = e.downcast_ref::<HanmingError>() {
                print_error_panel(&cli.output, &UserFacingError::from(error))?;
            } else {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            }
            std::process::exit(1);
        }
    }
}

/// Config loading logs through a scoped stderr subscriber, since the
/// configured one depends on the result.
fn load_config(path: Option<&Path>, verbose: bool) -> Result<HanmingConfig> {
    load_config_with(path, verbose, std::io::stderr)
}

fn load_config_with<W>(path: Option<&Path>, verbose: bool, writer: W) -> Result<HanmingConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = Registry::default()
        .with(env_filter(&LoggingConfig::default().level, verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(writer));

    let manager = tracing::subscriber::with_default(bootstrap, || match path {
        Some(path) => ConfigManager::load_from_path(path),
        None => ConfigManager::load(),
    })
    .context("Failed to load configuration")?;

    Ok(manager.config().clone())
}

fn env_filter(level: &str, verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let registry = Registry::default().with(env_filter(&logging.level, verbose));

    // Logs go to stderr so JSON output on stdout stays parseable
    match logging.format.as_str() {
        "json" => {
            let subscriber = registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            );
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        "compact" => {
            let subscriber = registry.with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            );
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        _ => {
            let subscriber =
                registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }
}

async fn execute_command(cli: &Cli, config: &HanmingConfig) -> Result<Value> {
    let provider = CompletionProviderFactory::create_from_config(&config.completion)
        .context("Failed to create completion provider")?;

    match &cli.command {
        Commands::Analyze { name, tab } => {
            let orchestrator = AnalysisOrchestrator::new(
                provider,
                AnalysisNotifier::new(config.analysis.notification_capacity),
                config.analysis.clone(),
            );
            orchestrator.analyze_name(name).await?;

            let adapter = PresentationAdapter::default();
            let current = orchestrator.current();
            let mut output = serde_json::json!({
                "summary": current.as_deref().map(|analysis| adapter.summary(analysis)),
            });

            if !tab.is_empty() {
                let tabs: Vec<_> = tab
                    .iter()
                    .filter_map(|t| adapter.tab_content(current.as_deref(), (*t).into()))
                    .collect();
                output["tabs"] = serde_json::to_value(tabs)?;
            }

            Ok(output)
        }

        Commands::Character { character } => {
            let result = CharacterExplorer::new(provider).explore(character).await?;
            Ok(serde_json::to_value(result)?)
        }

        Commands::Related { character } => {
            let result = CharacterExplorer::new(provider).related(character).await?;
            Ok(serde_json::to_value(result)?)
        }

        Commands::Culture { name } => {
            let result = CulturalContextPanel::new(provider).analyze(name).await?;
            Ok(serde_json::to_value(result)?)
        }

        Commands::Network { character } => {
            let result = MeaningNetworkPanel::new(provider).build(character).await?;
            let graph = PresentationAdapter::default().network_graph(&result.value);
            Ok(serde_json::json!({
                "source": result.source,
                "graph": graph,
            }))
        }

        Commands::Generate {
            original_name,
            traits,
            interests,
            preference,
            background,
        } => {
            let mut profile = NameProfile::new(original_name.as_str())?
                .with_traits(traits.iter().cloned())
                .with_interests(interests.iter().cloned());
            if let Some(preference) = preference {
                profile = profile.with_cultural_preference(preference.as_str());
            }
            if let Some(background) = background {
                profile = profile.with_family_background(background.as_str());
            }

            let generated = NameGenerator::new(provider)
                .with_settings(config.analysis.clone())
                .generate(&profile)
                .await;
            Ok(serde_json::to_value(generated)?)
        }

        Commands::Semantic { name } => {
            let profile = NameProfile::new(name.as_str())?;
            Ok(serde_json::to_value(SemanticModel::default().analyze(&profile.name))?)
        }

        Commands::Similarity { first, second } => {
            let first = NameProfile::new(first.as_str())?.name;
            let second = NameProfile::new(second.as_str())?.name;
            let similarity = SemanticModel::default().name_similarity(&first, &second);

            Ok(serde_json::to_value(SimilarityResult {
                first,
                second,
                similarity,
            })?)
        }

        Commands::InitConfig { path } => init_config(path.as_deref()),
    }
}

fn init_config(path: Option<&Path>) -> Result<Value> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => dirs::home_dir()
            .map(|home| home.join(".hanming").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hanming.toml")),
    };

    if path.exists() {
        return Ok(serde_json::to_value(InitConfigResult {
            path: path.display().to_string(),
            status: "exists".to_string(),
        })?);
    }

    ConfigManager::create_default_config(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(serde_json::to_value(InitConfigResult {
        path: path.display().to_string(),
        status: "created".to_string(),
    })?)
}

fn print_error_panel(format: &OutputFormat, error: &UserFacingError) -> Result<()> {
    match format {
        OutputFormat::Json => {
            eprintln!("{}", serde_json::to_string_pretty(error)?);
        }
        OutputFormat::Pretty => {
            eprintln!("{}", error.title.red().bold());
            eprintln!("  {}", error.message);
            eprintln!("{}", "建议的解决方案 Suggested Solutions".yellow());
            for suggestion in &error.suggestions {
                eprintln!("  - {}", suggestion);
            }
        }
    }
    Ok(())
}

fn print_output(format: &OutputFormat, value: &Value) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Pretty => {
            print_pretty(value, 0);
        }
    }
    Ok(())
}

fn print_pretty(value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let key_colored = key.cyan().bold();
                match val {
                    Value::String(s) => println!("{}{}: {}", indent, key_colored, s.green()),
                    Value::Number(n) => {
                        println!("{}{}: {}", indent, key_colored, n.to_string().yellow())
                    }
                    Value::Bool(b) => {
                        let val_colored = if *b { "true".green() } else { "false".red() };
                        println!("{}{}: {}", indent, key_colored, val_colored);
                    }
                    Value::Null => println!("{}{}: {}", indent, key_colored, "-".dimmed()),
                    nested => {
                        println!("{}{}:", indent, key_colored);
                        print_pretty(nested, depth + 1);
                    }
                }
            }
        }
        Value::Array(arr) if arr.iter().all(|v| !v.is_object() && !v.is_array()) => {
            let items: Vec<String> = arr
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect();
            println!("{}{}", indent, items.join(", "));
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                println!("{}{}{}:", indent, "Item ".cyan(), (i + 1).to_string().yellow());
                print_pretty(item, depth + 1);
            }
        }
        other => println!("{}{}", indent, other),
    }
}
