use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use besideai::adapters::auth::JwtSessionValidator;
use besideai::adapters::http::{
    app_router, AppState, BillingAppState, CreditsAppState, GateState, SiteAppState,
};
use besideai::adapters::postgres::{
    PostgresCreditLedger, PostgresDatabaseHealth, PostgresPlanCatalog, PostgresUserDirectory,
};
use besideai::application::handlers::credits::PlanCreditAllocator;
use besideai::config::AppConfig;
use besideai::domain::routing::RouteGate;
use besideai::ports::{CreditLedger, PlanCatalog, SessionValidator, UserDirectory};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let credits = Arc::new(config.credits.load_catalogue()?);
    let verifier = config.payment.webhook_verifier();
    if verifier.is_none() {
        tracing::warn!("No LemonSqueezy webhook secret configured; deliveries will be refused");
    }

    tracing::info!(url = %config.database.redacted_url(), "Connecting to database");
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let users: Arc<dyn UserDirectory> = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let plans: Arc<dyn PlanCatalog> = Arc::new(PostgresPlanCatalog::new(pool.clone()));
    let ledger: Arc<dyn CreditLedger> = Arc::new(PostgresCreditLedger::new(pool.clone()));
    let validator: Arc<dyn SessionValidator> =
        Arc::new(JwtSessionValidator::new(&config.auth.session_secret));

    let state = AppState {
        billing: BillingAppState {
            verifier,
            users: users.clone(),
            plans: plans.clone(),
            allocator: PlanCreditAllocator::new(ledger.clone(), credits.clone()),
        },
        credits: CreditsAppState {
            users,
            plans,
            ledger,
            config: credits,
        },
        site: SiteAppState {
            site: Arc::new(config.site.clone()),
            database: Arc::new(PostgresDatabaseHealth::new(pool)),
        },
        gate: GateState::new(RouteGate::new(config.auth.super_admin_list()), validator),
    };

    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening for incoming connections");
    axum::serve(listener, app).await?;

    Ok(())
}
