use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use cybersource_tools::CybersourceApi;
use fuse_engine::{NotificationApi, RefundApi, TransactionSearchApi};
use log::*;

use crate::{
    config::{NotificationSettings, ServerConfig, ServerOptions},
    errors::ServerError,
    integrations::{cybersource::CybersourceProcessor, ledger::LedgerClient},
    routes::{health, PaymentResponseRoute, RefundRoute, UncapturedPaymentsRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    if config.secret_key.is_empty() {
        error!("🪛️ FUSE_SECRET_KEY is not set. The server will not start without a notification signing key.");
        return Err(ServerError::ConfigurationError("No notification secret key (FUSE_SECRET_KEY) is set".into()));
    }
    let ledger = LedgerClient::new(config.ledger.clone())?;
    let api = CybersourceApi::new(config.cybersource.clone())
        .map_err(|e| ServerError::InitializeError(format!("Could not create the Cybersource client. {e}")))?;
    let processor = CybersourceProcessor::new(api);
    let srv = create_server_instance(config, ledger, processor)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    ledger: LedgerClient,
    processor: CybersourceProcessor,
) -> Result<Server, ServerError> {
    let settings = NotificationSettings::from(&config);
    let options = ServerOptions::from(&config);
    let search_days = config.search_days;
    let max_pages = config.search_max_pages;
    let srv = HttpServer::new(move || {
        let notification_api = NotificationApi::new(ledger.clone());
        let refund_api = RefundApi::new(ledger.clone(), processor.clone())
            .with_search_days(search_days)
            .with_max_pages(max_pages);
        let search_api = TransactionSearchApi::new(processor.clone()).with_max_pages(max_pages);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("fuse::access_log"))
            .app_data(web::Data::new(settings.clone()))
            .app_data(web::Data::new(options))
            .app_data(web::Data::new(notification_api))
            .app_data(web::Data::new(refund_api))
            .app_data(web::Data::new(search_api))
            .service(health)
            .service(PaymentResponseRoute::<LedgerClient>::new())
            .service(RefundRoute::<LedgerClient, CybersourceProcessor>::new())
            .service(UncapturedPaymentsRoute::<CybersourceProcessor>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
