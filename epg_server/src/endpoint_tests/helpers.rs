use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use epg_common::Address;
use epg_engine::{
    assets::{AssetDescriptor, AssetRegistry},
    db_types::{Order, OrderStatusType},
};

pub const USDT_CONTRACT: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";
pub const RECEIVING_ADDRESS: &str = "0x52908400098527886e0f7030069857d2e4169ee7";

pub fn test_assets() -> AssetRegistry {
    let usdt = USDT_CONTRACT.parse().unwrap();
    AssetRegistry::new()
        .with(AssetDescriptor::native("MATIC", 18))
        .with(AssetDescriptor::erc20("USDT", 6, usdt))
}

pub fn sample_order(id: i64, address: Address, amount: &str, token: &str, status: OrderStatusType) -> Order {
    Order {
        id,
        address,
        expected_amount: amount.to_string(),
        token: token.to_string(),
        status,
        creation_block: 42,
        tx_hash: None,
        created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
    }
}

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::get().uri(path).to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    let (_, res) = test::call_service(&service, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub async fn post_request(path: &str, body: serde_json::Value, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).set_json(body).to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    let (_, res) = test::call_service(&service, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
