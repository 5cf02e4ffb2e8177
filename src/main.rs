use log::info;
use tokio::net::TcpListener;

use promptcraft::server::shutdown_signal;
use promptcraft::{build_generator, router, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let generator = build_generator(&config)?;
    let app = router(AppState::new(generator));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("promptcraft listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
