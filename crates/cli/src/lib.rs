use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use control_map_catalog::CatalogConfig;
use control_map_graph::ExportFormat;
use std::env;
use std::path::{Path, PathBuf};

mod command;
mod report;

pub const CONFIG_ENV: &str = "CONTROL_MAP_CONFIG";

#[derive(Parser)]
#[command(name = "control-map")]
#[command(about = "Map ISO-27001 controls to supporting documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (overrides CONTROL_MAP_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Controls folder
    #[arg(long, global = true)]
    controls: Option<PathBuf>,

    /// Reference documents folder
    #[arg(long, global = true)]
    documents: Option<PathBuf>,

    /// Selection reports folder
    #[arg(long, global = true)]
    selections: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Fail when any file had to be skipped
    #[arg(long, global = true)]
    strict: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the control/document graph
    Graph(GraphArgs),

    /// List loaded controls
    Controls(ControlsArgs),

    /// List loaded reference documents
    Documents,

    /// List selection records with their resolved document ids
    Selections,

    /// Print the path of the file holding a control
    Locate(LocateArgs),

    /// Print node counts and coverage gaps
    Summary,

    /// Render a markdown coverage report
    Report,
}

#[derive(Args)]
struct GraphArgs {
    /// Output shape
    #[arg(long, value_enum, default_value_t = GraphFormat::Plain)]
    format: GraphFormat,
}

#[derive(Args)]
struct ControlsArgs {
    /// Include full control text
    #[arg(long)]
    with_content: bool,
}

#[derive(Args)]
struct LocateArgs {
    /// Control id, e.g. 5.1 or 8.15
    id: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GraphFormat {
    Plain,
    Cytoscape,
}

impl From<GraphFormat> for ExportFormat {
    fn from(value: GraphFormat) -> Self {
        match value {
            GraphFormat::Plain => ExportFormat::Plain,
            GraphFormat::Cytoscape => ExportFormat::Cytoscape,
        }
    }
}

/// Output switches shared by every command.
pub(crate) struct OutputOptions {
    pub strict: bool,
    pub pretty: bool,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    log::debug!("Effective config: {config:?}");

    let output = OutputOptions {
        strict: cli.strict,
        pretty: cli.pretty,
    };

    let rendered = match cli.command {
        Commands::Graph(args) => command::run_graph(&config, &output, args.format.into())?,
        Commands::Controls(args) => command::run_controls(&config, &output, args.with_content)?,
        Commands::Documents => command::run_documents(&config, &output)?,
        Commands::Selections => command::run_selections(&config, &output)?,
        Commands::Locate(args) => command::run_locate(&config, &args.id)?,
        Commands::Summary => command::run_summary(&config, &output)?,
        Commands::Report => command::run_report(&config, &output)?,
    };
    println!("{rendered}");
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Config file (flag, then env), then per-folder flag overrides.
fn resolve_config(cli: &Cli) -> Result<CatalogConfig> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    let mut config = match config_path {
        Some(path) => {
            let path = absolutize(&cwd, &path);
            CatalogConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => CatalogConfig::rooted_at(&cwd),
    };

    if let Some(dir) = &cli.controls {
        config.controls_dir = absolutize(&cwd, dir);
    }
    if let Some(dir) = &cli.documents {
        config.documents_dir = absolutize(&cwd, dir);
    }
    if let Some(dir) = &cli.selections {
        config.selections_dir = absolutize(&cwd, dir);
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
