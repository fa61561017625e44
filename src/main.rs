use std::net::SocketAddr;
use std::sync::Arc;

use studio_contact::config::AppConfig;
use studio_contact::inquiry::{InquiryProcessor, ProcessorConfig};
use studio_contact::mail::{MailSender, SmtpMailer};
use studio_contact::server::{RateLimiter, app_routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install rustls crypto provider")?;

    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    // ── Mail ─────────────────────────────────────────────────────────────
    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    match mailer.verify().await {
        Ok(()) => tracing::info!(host = %config.mail.smtp_host, "Email server is ready to send messages"),
        Err(e) => tracing::error!(error = %e, "Email configuration error"),
    }

    // ── HTTP ─────────────────────────────────────────────────────────────
    let processor = Arc::new(InquiryProcessor::new(
        mailer,
        ProcessorConfig::from(&config.mail),
    )?);
    let limiter = RateLimiter::new(config.rate_limit.clone());
    let app = app_routes(processor, limiter);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(
        port = config.port,
        recipient = %config.mail.recipient,
        "Piano Corner Studio contact server running (POST /contact, GET /, GET /ping)"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
