#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use class_planner::{PlannerConfig, ScheduleStore, http_api};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "class_planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let config = PlannerConfig::load(config_path.as_deref())?;
    let storage = config.open_storage()?;
    let store = ScheduleStore::open(storage, config.credentials());

    println!("class-planner HTTP API listening on http://{}", config.http.addr);
    http_api::serve(config.http.addr, store).await?;
    Ok(())
}

