use beavery_core::config::{ConfigError, Env};

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the hosted provider project. Env var: `SUPABASE_URL`.
    pub supabase_url: String,
    /// Public key used for calls made on behalf of a user.
    pub anon_key: String,
    /// Privileged key used for admin calls (metadata mirroring).
    pub service_role_key: String,
    /// HS256 secret for local token checks; without it every token is checked
    /// against the provider's `/user` endpoint.
    pub jwt_secret: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// The single browser origin allowed by CORS (default `http://localhost:3000`).
    pub frontend_url: String,
    /// TCP port for the HTTP server (default 3001). Env var: `PORT`.
    pub port: u16,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&Env::process())
    }

    pub fn from_source<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            supabase_url: env.required("SUPABASE_URL")?,
            anon_key: env.required("SUPABASE_ANON_KEY")?,
            service_role_key: env.required("SUPABASE_SERVICE_ROLE_KEY")?,
            jwt_secret: env.optional("SUPABASE_JWT_SECRET"),
            database_url: env.required("DATABASE_URL")?,
            frontend_url: env.or_default("FRONTEND_URL", "http://localhost:3000"),
            port: env.parse_or("PORT", 3001)?,
            run_migrations: env.parse_or("RUN_MIGRATIONS", false)?,
        })
    }
}
