use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use beavery_api::config::ApiConfig;
use beavery_api::infra::db::DbUserRepository;
use beavery_api::infra::identity::ProviderIdentity;
use beavery_api::router::build_router;
use beavery_api::state::LiveState;
use beavery_api_migration::{Migrator, MigratorTrait as _};
use beavery_core::middleware::cors_layer;
use beavery_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing("info");

    let config = ApiConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None).await.context("run migrations")?;
        info!("migrations applied");
    }

    let state = LiveState {
        users: DbUserRepository { db },
        identity: ProviderIdentity::from_config(&config),
    };

    let cors = cors_layer(&config.frontend_url).context("FRONTEND_URL is not a valid origin")?;
    let router = build_router(state).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!(
        local_jwt = config.jwt_secret.is_some(),
        "beavery api listening on {addr}"
    );
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
