use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use epg_engine::{
    events::{EventHandlers, EventHooks},
    run_migrations,
    OrderApi,
    SqliteDatabase,
};
use evm_rpc::EvmRpc;
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::EthereumReader,
    payment_worker::start_reconciler_worker,
    routes::{health, NewPaymentRoute, PaymentStatusRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    run_migrations(db.pool()).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let rpc = EvmRpc::new(config.node.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("⛓️ Chain client ready. RPC requests time out after {}s", config.node.request_timeout.as_secs());
    let chain = EthereumReader::new(rpc);

    let mut hooks = EventHooks::default();
    hooks.on_order_settled(|ev| {
        Box::pin(async move {
            info!(
                target: "epg::audit",
                "🏁 Order #{} settled. {} base units received at {} for {} {}",
                ev.order.id, ev.received, ev.order.address, ev.order.expected_amount, ev.order.token
            );
        })
    });
    let handlers = EventHandlers::new(16, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;

    // The worker holds its own clones; the handle is deliberately dropped since the task runs until shutdown.
    let _worker = start_reconciler_worker(
        db.clone(),
        chain.clone(),
        config.assets.clone(),
        producers,
        config.reconcile_interval,
    );

    let srv = create_server_instance(config, db, chain)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    chain: EthereumReader,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let order_api = OrderApi::new(db.clone(), config.assets.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("epg::access_log"))
            .app_data(web::Data::new(order_api))
            .app_data(web::Data::new(chain.clone()))
            .service(health)
            .service(NewPaymentRoute::<SqliteDatabase, EthereumReader>::new())
            .service(PaymentStatusRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
