use csrf_lab::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.log_config().init()?;

    csrf_lab::run(config).await?;
    Ok(())
}
