use std::net::SocketAddr;

use axum::{extract::Request, ServiceExt};
use suv_cms_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    init_config()?;
    let config = get_config().clone();

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("database migrations applied");

    if config.telegram_bot_token.is_none() || config.telegram_chat_id.is_none() {
        tracing::warn!("Telegram is not configured; contact notifications are disabled");
    }

    let server_address = config.server_address.clone();
    let app_state = AppState::new(pool, config)?;
    let app = routes::app(app_state);

    let addr: SocketAddr = server_address.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
