//! Beavery onboarding in the terminal.
//!
//! # Usage
//!
//! ```bash
//! SUPABASE_URL=https://project.supabase.co SUPABASE_ANON_KEY=... \
//!     cargo run -p beavery-cli -- --backend-url http://localhost:3001
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use beavery_cli::session::{Outcome, run_dashboard, run_onboarding};
use beavery_core::tracing::init_cli_tracing;
use beavery_onboarding::backend::BackendClient;
use beavery_onboarding::hosted::HostedIdentity;
use beavery_onboarding::marker::MemorySessionStore;
use beavery_onboarding::{Dashboard, OnboardingController};
use beavery_provider::auth::AuthClient;
use beavery_provider::rest::RestClient;

#[derive(Parser)]
#[command(about = "Sign in to Beavery with an emailed one-time code")]
struct Args {
    /// Base URL of the hosted provider project
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: String,

    /// Public (anon) key of the provider project
    #[arg(long, env = "SUPABASE_ANON_KEY")]
    anon_key: String,

    /// Base URL of the Beavery API
    #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:3001")]
    backend_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_cli_tracing("warn");
    let args = Args::parse();

    let identity = Arc::new(HostedIdentity::new(AuthClient::new(
        &args.supabase_url,
        &args.anon_key,
    )));
    let profiles = Arc::new(RestClient::new(&args.supabase_url, &args.anon_key));
    let store = Arc::new(MemorySessionStore::new());

    let mut controller = OnboardingController::new(
        identity.clone(),
        profiles.clone(),
        BackendClient::new(&args.backend_url),
        store.clone(),
    );
    controller.resume_profile().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();

    if run_onboarding(&mut controller, &mut lines, &mut out).await? == Outcome::Quit {
        return Ok(());
    }

    let dashboard = Dashboard::new(identity, profiles, store);
    run_dashboard(&dashboard, &mut lines, &mut out).await
}
