//! therapy-booking server binary.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use therapy_booking::adapters::http::{build_app_router, RouterOptions};
use therapy_booking::adapters::postgres::{
    PostgresFeedbackReader, PostgresSessionReader, PostgresSessionRepository,
    PostgresTherapistDirectory,
};
use therapy_booking::adapters::{
    InMemoryEventBus, InMemorySessionStore, InMemoryTherapistDirectory, JwtTokenValidator,
    MockPaymentGateway, NotificationCenter, StaticMeetingLinkProvider,
};
use therapy_booking::app::{App, BookingRules, Infrastructure};
use therapy_booking::config::{AppConfig, DatabaseConfig, ServerConfig};
use therapy_booking::ports::{MeetingLinkProvider, PaymentGateway, TherapistDirectory, TokenValidator};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        database = config.database.is_configured(),
        "configuration loaded"
    );

    let tokens: Arc<dyn TokenValidator> = Arc::new(JwtTokenValidator::new(
        SecretString::new(config.auth.jwt_secret.expose_secret().clone()),
        config.auth.issuer.clone(),
        config.auth.leeway_secs,
    ));

    let gateway = if config.payment.mock_decline_all {
        MockPaymentGateway::declining()
    } else {
        MockPaymentGateway::new()
    };
    let gateway = gateway.with_latency(Duration::from_millis(config.payment.mock_latency_ms));
    let payments: Arc<dyn PaymentGateway> = Arc::new(gateway);
    let links: Arc<dyn MeetingLinkProvider> =
        Arc::new(StaticMeetingLinkProvider::new(config.booking.meeting_base_url.clone()));

    let infra = if let Some(url) = config.database.connection_url() {
        postgres_infrastructure(url, &config.database, payments, links, tokens).await?
    } else {
        tracing::warn!("no database configured, using in-memory stores");
        let directory: Arc<dyn TherapistDirectory> = match &config.booking.therapists_file {
            Some(path) => Arc::new(InMemoryTherapistDirectory::from_json_file(path).await?),
            None => Arc::new(InMemoryTherapistDirectory::new()),
        };
        Infrastructure::in_memory(InMemorySessionStore::new(), directory, payments, links, tokens)
    };

    let rules = BookingRules {
        currency: config.payment.currency.clone(),
        late_cancellation_hours: config.booking.late_cancellation_hours,
    };
    let app = App::assemble(
        infra,
        &rules,
        Arc::new(InMemoryEventBus::with_history(config.booking.event_history)),
        Arc::new(NotificationCenter::with_capacity(config.booking.notification_capacity)),
    );

    let router = build_app_router(
        app.state,
        &RouterOptions {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    if server.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn postgres_infrastructure(
    url: &str,
    database: &DatabaseConfig,
    payments: Arc<dyn PaymentGateway>,
    links: Arc<dyn MeetingLinkProvider>,
    tokens: Arc<dyn TokenValidator>,
) -> Result<Infrastructure, BoxError> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .max_lifetime(database.max_lifetime())
        .connect(url)
        .await?;
    tracing::info!("database pool created");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    Ok(Infrastructure {
        repository: Arc::new(PostgresSessionRepository::new(pool.clone())),
        reader: Arc::new(PostgresSessionReader::new(pool.clone())),
        feedback: Arc::new(PostgresFeedbackReader::new(pool.clone())),
        directory: Arc::new(PostgresTherapistDirectory::new(pool)),
        payments,
        links,
        tokens,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
