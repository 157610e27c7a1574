use roster_core::init_logging;
use roster_server::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside local development.
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    roster_server::run(config).await?;
    Ok(())
}
