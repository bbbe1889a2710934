//! Sakai crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sakai_crawler::{
    error::Result,
    models::Config,
    pipeline,
    services::PortalScraper,
    storage::LocalStorage,
};

/// sakai-crawler - Sakai LMS course content extractor
#[derive(Parser, Debug)]
#[command(
    name = "sakai-crawler",
    version,
    about = "Extract courses, announcements, assignments and exams from a Sakai portal"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the courses the session is enrolled in
    Courses,

    /// Scrape everything and write a snapshot
    Scrape {
        /// Snapshot directory (default: output.dir from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging; `RUST_LOG` wins over the configured level.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(&cli.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    config.apply_env();
    init_logging(cli.verbose, &config.logging.level);

    match loaded {
        Ok(_) => log::info!("Loaded configuration from {}", cli.config.display()),
        Err(e) => log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        ),
    }

    match cli.command {
        Command::Courses => {
            config.validate()?;
            let scraper = PortalScraper::from_config(&config)?;
            let courses = scraper.scrape_courses().await;
            for course in &courses {
                println!("{}\t{}", course.site_id, course.display_name());
            }
            log::info!("{} courses", courses.len());
        }

        Command::Scrape { output } => {
            config.validate()?;
            let dir = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            let storage = LocalStorage::new(&dir);
            let scraper = PortalScraper::from_config(&config)?;

            pipeline::run_scrape(&config, &scraper, &storage).await?;
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
