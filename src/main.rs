//! podcast-sync - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use podcast_sync::{
    cli::Args,
    config::{validate_config, Config, PodcastConfig},
    download::{sync_podcast, GlobalState, SyncState},
    error::{exit_codes, Error, Result},
    fs::get_podcast_folder,
    output::{
        print_banner, print_config_summary, print_error, print_global_stats, print_info,
        print_podcast_stats, print_warning,
    },
    source::{build_source, HttpClient, Transport},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Source(_) | Error::Feed(_) => {
                    ExitCode::from(exit_codes::SOURCE_ERROR as u8)
                }
                Error::PodcastsFailed(_) => {
                    ExitCode::from(exit_codes::SOME_PODCASTS_FAILED as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else if args.has_ad_hoc_podcast() {
        Config::default()
    } else {
        return Err(Error::Config(format!(
            "Configuration file not found: {}. Pass --feed or --listing to sync a single podcast",
            config_path.display()
        )));
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let names: Vec<String> = config.podcasts.iter().map(|p| p.name.clone()).collect();
    print_config_summary(
        &names,
        &config.download_directory().display().to_string(),
        config.options.dry_run,
    );

    let mut global_state = GlobalState::default();

    // Podcasts are synced one after another
    for podcast in &config.podcasts {
        print_info(&format!(
            "Processing {} ({} {})",
            podcast.name, podcast.source_kind, podcast.source_locator
        ));

        match process_podcast(&config, podcast).await {
            Ok(state) => {
                print_podcast_stats(&state);
                if state.has_failures() {
                    print_warning(&format!(
                        "Some episodes of {} failed and will be retried next run",
                        podcast.name
                    ));
                }
                global_state.add_podcast_stats(&state);
            }
            Err(e) => {
                print_error(&format!("Failed to process {}: {}", podcast.name, e));
                global_state.mark_podcast_failed();
            }
        }
    }

    print_global_stats(&global_state);

    if global_state.podcasts_failed > 0 {
        return Err(Error::PodcastsFailed(global_state.podcasts_failed));
    }

    Ok(())
}

/// Run one sync pass for a single podcast.
async fn process_podcast(config: &Config, podcast: &PodcastConfig) -> Result<SyncState> {
    let timeout = podcast.request_timeout(&config.options);
    let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(&config.options, timeout)?);
    let source = build_source(
        podcast,
        transport.clone(),
        Duration::from_millis(config.options.page_delay_ms),
    )?;

    let folder = get_podcast_folder(config, podcast);

    sync_podcast(
        source.as_ref(),
        transport.as_ref(),
        &config.options,
        podcast,
        &folder,
    )
    .await
}
