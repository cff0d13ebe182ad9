use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bizbooks::config::{AppConfig, Config};
use bizbooks::middleware::{ErrorHandler, RequestId};
use bizbooks::modules::documents::{DocumentEditor, DocumentService, MySqlDocumentRepository};
use bizbooks::modules::ledger::{LedgerBalanceView, LedgerService, MySqlLedgerRepository};
use bizbooks::modules::taxes::{MySqlTaxRateRepository, TaxRateService, TaxRuleEngine};
use bizbooks::modules::{documents, health, ledger, taxes};

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bizbooks={},actix_web=info", app.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if app.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.app);
    config.validate().context("Configuration validation failed")?;

    tracing::info!(env = %config.app.env, "Starting bizbooks");
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let engine = TaxRuleEngine::new();
    let rate_service = Arc::new(TaxRateService::new(Arc::new(MySqlTaxRateRepository::new(
        db_pool.clone(),
    ))));
    let document_service = Arc::new(DocumentService::new(
        Arc::new(MySqlDocumentRepository::new(db_pool.clone())),
        DocumentEditor::default(),
    ));
    let ledger_service = Arc::new(
        LedgerService::new(
            Arc::new(MySqlLedgerRepository::new(db_pool.clone())),
            LedgerBalanceView::new(),
        )
        .with_report_timeout(Duration::from_secs(config.app.report_timeout_secs)),
    );

    let development = config.app.env == "development";
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let cors = if development {
            Cors::permissive()
        } else {
            Cors::default()
        };

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(engine))
            .app_data(web::Data::new(rate_service.clone()))
            .app_data(web::Data::new(document_service.clone()))
            .app_data(web::Data::new(ledger_service.clone()))
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .configure(health::controllers::configure)
            .configure(taxes::controllers::configure)
            .configure(documents::controllers::configure)
            .configure(ledger::controllers::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
