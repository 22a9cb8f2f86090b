use staff_server::db::identities;
use staff_server::util::hash_password;
use staff_server::{AppState, Config, DbService, build_app, init_logger_with_file};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;

    tracing::info!("Starting staff-server (env: {})", config.environment);

    let db = DbService::connect(&config.database_url).await?;

    // Bootstrap administrator
    if let Some(password) = &config.admin_password {
        let password_hash =
            hash_password(password).map_err(|e| format!("Failed to hash admin password: {e}"))?;
        let admin = identities::ensure_admin(
            &db.pool,
            &config.admin_username,
            &config.admin_email,
            &password_hash,
        )
        .await
        .map_err(|e| format!("Failed to ensure admin account: {e}"))?;
        tracing::info!(user_id = admin.id, username = %admin.username, "Administrator account ready");
    }

    let http_port = config.http_port;
    let app = build_app(AppState::new(db.pool, config));

    let http_addr = format!("0.0.0.0:{http_port}");
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("staff-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
