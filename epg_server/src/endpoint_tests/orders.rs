use actix_web::{http::StatusCode, test, web, web::ServiceConfig, App};
use epg_engine::{
    db_types::OrderStatusType,
    traits::ChainReaderError,
    OrderApi,
};
use serde_json::json;

use super::{
    helpers::{get_request, post_request, sample_order, test_assets, RECEIVING_ADDRESS},
    mocks::{MockChain, MockStore},
};
use crate::{
    data_objects::{OrderStatusResult, PaymentOrderResult},
    routes::{health, NewPaymentRoute, PaymentStatusRoute},
};

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init().ok();
    let app = App::new().service(health);
    let service = test::init_service(app).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn new_payment_returns_a_fresh_address() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/api/payment", json!({"amount": "10", "token": "USDT"}), configure_create).await;
    assert_eq!(status, StatusCode::CREATED);
    let result = serde_json::from_str::<PaymentOrderResult>(&body).expect("Invalid response body");
    assert_eq!(result.order_id, 1);
    // The address is generated server-side, so only its shape can be checked here
    assert_eq!(result.address.as_str().len(), 42);
    assert_eq!(result.amount, "10");
    assert_eq!(result.token, "USDT");
}

#[actix_web::test]
async fn new_payment_rejects_unknown_tokens() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/api/payment", json!({"amount": "10", "token": "DOGE"}), configure_create).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("not accepted"), "unexpected body: {body}");
}

#[actix_web::test]
async fn new_payment_rejects_malformed_amounts() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/api/payment", json!({"amount": "ten", "token": "USDT"}), configure_create).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("amount"), "unexpected body: {body}");
}

#[actix_web::test]
async fn new_payment_when_the_node_is_down() {
    let _ = env_logger::try_init().ok();
    let (status, _body) =
        post_request("/api/payment", json!({"amount": "10", "token": "USDT"}), configure_node_down).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn new_payment_rejects_an_implausible_block_height() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/api/payment", json!({"amount": "10", "token": "USDT"}), configure_bad_height).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("block height"), "unexpected body: {body}");
}

#[actix_web::test]
async fn payment_status_for_a_paid_order() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/payment/7", configure_status).await;
    assert_eq!(status, StatusCode::OK);
    let result = serde_json::from_str::<OrderStatusResult>(&body).expect("Invalid response body");
    assert_eq!(result.order_id, 7);
    assert_eq!(result.status, OrderStatusType::Paid);
}

#[actix_web::test]
async fn payment_status_for_a_missing_order() {
    let _ = env_logger::try_init().ok();
    let (status, _body) = get_request("/api/payment/12345", configure_status).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn configure_create(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    // The handler passes the freshly generated address through to the store; echo it back in the record
    store.expect_insert_order().returning(|order, address| {
        Ok(sample_order(1, address, &order.expected_amount, &order.token, OrderStatusType::Pending))
    });
    let mut chain = MockChain::new();
    chain.expect_current_block().returning(|| Ok(42));
    let api = OrderApi::new(store, test_assets());
    cfg.service(NewPaymentRoute::<MockStore, MockChain>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(chain));
}

fn configure_node_down(cfg: &mut ServiceConfig) {
    let store = MockStore::new();
    let mut chain = MockChain::new();
    chain.expect_current_block().returning(|| Err(ChainReaderError::Unavailable("connection refused".into())));
    let api = OrderApi::new(store, test_assets());
    cfg.service(NewPaymentRoute::<MockStore, MockChain>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(chain));
}

fn configure_bad_height(cfg: &mut ServiceConfig) {
    let store = MockStore::new();
    let mut chain = MockChain::new();
    // A block number that cannot fit the order record's signed column
    chain.expect_current_block().returning(|| Ok(u64::MAX));
    let api = OrderApi::new(store, test_assets());
    cfg.service(NewPaymentRoute::<MockStore, MockChain>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(chain));
}

fn configure_status(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_fetch_order_by_id().returning(|id| match id {
        7 => Ok(Some(sample_order(7, RECEIVING_ADDRESS.parse().unwrap(), "10", "USDT", OrderStatusType::Paid))),
        _ => Ok(None),
    });
    let api = OrderApi::new(store, test_assets());
    cfg.service(PaymentStatusRoute::<MockStore>::new()).app_data(web::Data::new(api));
}
