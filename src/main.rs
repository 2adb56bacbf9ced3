mod cli;
mod config;
mod credentials;
mod error;
mod importer;
mod log;
mod model;
mod providers;
mod source;
mod transform;

use anyhow::Result;

use cli::Command;
use importer::Importer;
use log::{ConsoleSink, JsonlSink, Logger};
use providers::pivotal::PivotalTracker;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match cli::parse_args(&args)? {
        Command::Help => {
            cli::print_help();
            return Ok(());
        }
        Command::Import(args) => args,
    };

    let Some(project_id) = config::env_value(config::PROJECT_ID_VAR) else {
        importer::report_missing_project_id(&Logger::new().with_sink(ConsoleSink));
        return Ok(());
    };

    let config = config::load_config()?;
    let options = config::resolve_options(&config, &args);

    let mut logger = Logger::new().with_sink(ConsoleSink);
    if config.activity_log() {
        logger = logger.with_sink(JsonlSink::new(JsonlSink::default_path()));
    }

    let importer = Importer::new(
        Box::new(PivotalTracker::new(config.base_url())),
        credentials::from_env_or_prompt(config::env_value(config::TOKEN_VAR)),
        logger,
        options,
    );

    importer.run(Some(project_id)).await?;

    Ok(())
}
