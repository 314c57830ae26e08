use clap::{Parser, Subcommand};
use salesdash_cli::CliContext;
use salesdash_cli::commands;
use salesdash_cli::logging;
use salesdash_cli::readline;
use salesdash_core::{AppConfig, AppConfigExt, Dataset, GroupingMode, InputEvent};
use std::error::Error;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser)]
#[command(version, about = "Interactive sales analytics dashboard")]
struct Args {
    /// Sales CSV to load (overrides the configured data path)
    #[arg(short, long)]
    data: Option<String>,
    /// chrono format of the `date` column
    #[arg(long)]
    date_format: Option<String>,
    /// Initial grouping mode
    #[arg(short, long)]
    mode: Option<GroupingMode>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let mut config = AppConfig::load();
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(format) = args.date_format {
        config.date_format = format;
    }
    if let Some(mode) = args.mode {
        config.default_mode = mode;
    }

    // Nothing is served from a partially loaded dataset
    let dataset = Dataset::load(&config.data_path, &config.load_options()).map_err(|e| {
        tracing::error!(path = %config.data_path, error = %error_chain(&e), "Failed to load sales data");
        format!("failed to load {}: {}", config.data_path, error_chain(&e))
    })?;

    let ctx = CliContext::new(config, Arc::new(dataset));
    commands::show(&ctx).await;

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List regions and mark the selected ones
    Regions,
    /// Replace the region selection (no arguments selects nothing)
    Select { regions: Vec<String> },
    /// Add or remove one region
    Toggle { region: String },
    /// Set the time-series grouping: total, by-region or by-product
    Mode { mode: GroupingMode },
    ClearAll,
    SelectAll,
    /// Print the current KPIs and views
    Show,
    /// Write the current views as JSON
    Export {
        #[arg(short, long)]
        path: String,
    },
    Config,
    /// Persist the current grouping mode as the default
    SaveConfig,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "salesdash".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Regions) => commands::list_regions(ctx).await,
        Some(Commands::Select { regions }) => {
            commands::apply(ctx, InputEvent::SetRegions(regions.into_iter().collect())).await
        }
        Some(Commands::Toggle { region }) => {
            commands::apply(ctx, InputEvent::ToggleRegion(region)).await
        }
        Some(Commands::Mode { mode }) => commands::apply(ctx, InputEvent::SetMode(mode)).await,
        Some(Commands::ClearAll) => commands::apply(ctx, InputEvent::ClearAll).await,
        Some(Commands::SelectAll) => commands::apply(ctx, InputEvent::SelectAll).await,
        Some(Commands::Show) => commands::show(ctx).await,
        Some(Commands::Export { path }) => commands::export(ctx, &path).await?,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::SaveConfig) => commands::save_config(ctx).await?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

fn error_chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
