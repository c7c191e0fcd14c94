// Main entry point
use clap::Parser;
use colored::Colorize;
use fairmap::application;
use fairmap::application::dashboard::ExhibitorSource;
use fairmap::domain::dashboard::derive_view;
use fairmap::domain::traits::GeocodeStore;
use fairmap::infrastructure;
use fairmap::infrastructure::config::load_config;
use fairmap::interfaces::cli::Cli;
use fairmap::interfaces::shutdown::{listen_for_ctrl_c, until_shutdown};
use fairmap::presentation;
use fairmap::presentation::progress::ProgressBarObserver;
use fairmap::state::AppState;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let shutdown_rx = listen_for_ctrl_c();

    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        infrastructure::config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = infrastructure::config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            let config_path_clone = config_path.clone();
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor)
                    .arg(&config_path_clone)
                    .status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }

    // Setup resolution store path (from config or default)
    let db_path = infrastructure::config::get_database_path(&config);
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let db_conn = infrastructure::storage::db::init_database(&db_path).await?;
    let state = AppState::new(db_conn, config.clone())?;

    if cli.status {
        print_status(&state, &db_path).await?;
        return Ok(());
    }
    if cli.clear_cache {
        let removed = state.store().clear().await?;
        println!("Removed {} stored locations", removed);
        return Ok(());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = presentation::theme::Theme::from_name(theme_name);
    let observer = ProgressBarObserver::new();

    // Ad-hoc mode: resolve the given place names
    if !cli.places.is_empty() {
        let resolving =
            application::resolve::resolve_places(&state, &cli.places, cli.nocache, &observer);
        let Some(result) = until_shutdown(resolving, shutdown_rx).await else {
            eprintln!("Geocoding interrupted, results discarded");
            return Ok(());
        };
        let cache = result?;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&cache)?);
        } else {
            print!(
                "{}",
                presentation::render::format_resolution(&cli.places, &cache, &theme)
            );
        }
        return Ok(());
    }

    let dataset_path = cli
        .dataset
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.dataset_path));
    let configured_exhibitors = config.exhibitors_path.as_ref().map(PathBuf::from);
    let exhibitors = match (&cli.exhibitors, &configured_exhibitors) {
        (Some(path), _) => Some(ExhibitorSource::Requested(path)),
        (None, Some(path)) => Some(ExhibitorSource::Configured(path)),
        (None, None) => None,
    };

    let loading = application::dashboard::load_dashboard(
        &state,
        &dataset_path,
        exhibitors,
        cli.nocache,
        &observer,
    );
    let Some(result) = until_shutdown(loading, shutdown_rx).await else {
        eprintln!("Geocoding interrupted, results discarded");
        return Ok(());
    };
    let data = match result {
        Ok(data) => data,
        Err(fairmap::domain::error::FairError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!(
                "{}",
                format!("Dataset '{}' not found", dataset_path.display()).red()
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let session = application::dashboard::build_session(
        &data.dataset,
        cli.months,
        cli.segments,
        cli.states,
        cli.select,
    )?;
    let view = derive_view(&data.dataset, &session, &data.exhibitors);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!(
            "{}",
            presentation::render::format_view(&view, &theme, config.enable_emoji)
        );
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &infrastructure::config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = infrastructure::config::log_level_directive(&logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn print_status(state: &AppState, db_path: &std::path::Path) -> anyhow::Result<()> {
    println!("{}", "fairmap Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let count = state.store().count().await?;
    println!("Geocode cache: {} ({} locations)", db_path.display(), count);

    let config = state.config.read().await;
    println!(
        "Config: {}",
        infrastructure::config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Geocoder: {}", config.geocoder.endpoint);
    println!("Client identifier: {}", config.geocoder.client_identifier);
    println!(
        "Pacing: {} ms between calls, {} retries",
        config.geocoder.min_delay_ms, config.geocoder.max_retries
    );
    println!(
        "Persistent cache: {}",
        if config.cache.persist { "on" } else { "off" }
    );

    Ok(())
}
