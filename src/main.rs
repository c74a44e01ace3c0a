//! Server binary: reads settings from the environment, connects the Supabase client and serves the API.

use sg_api::{app, AppState, HttpOptions, Settings, SupabaseClient};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sg_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = SupabaseClient::new(&settings.supabase_url, &settings.supabase_key)?;
    let state = AppState::new(store);
    let router = app(state, HttpOptions::from(&settings));

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
