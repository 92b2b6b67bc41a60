//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
use actix_web::{get, web, HttpResponse, Responder};
use epg_engine::{
    db_types::NewOrder,
    traits::{ChainReader, OrderStore},
    OrderApi,
};
use log::*;

use crate::{
    data_objects::{NewPaymentParams, OrderStatusResult, PaymentOrderResult},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Payments  --------------------------------------------------
route!(new_payment => Post "/api/payment" impl OrderStore, ChainReader);
/// Creates a new payment order.
///
/// The token symbol must be one of the configured assets, and the amount must be exactly representable at that
/// asset's decimal scale. The response carries the fresh single-use receiving address the shopper should pay to.
/// The chain height at creation time is recorded with the order.
pub async fn new_payment<B: OrderStore, C: ChainReader>(
    params: web::Json<NewPaymentParams>,
    api: web::Data<OrderApi<B>>,
    chain: web::Data<C>,
) -> Result<HttpResponse, ServerError> {
    let params = params.into_inner();
    debug!("💻️ Received new payment request for {} {}", params.amount, params.token);
    let height = chain.current_block().await?;
    // A height that does not fit an i64 is a corrupt node response; never truncate it into the order record
    let creation_block = i64::try_from(height)
        .map_err(|_| ServerError::ChainUnavailable(format!("Implausible block height {height}")))?;
    let order = api.create_order(NewOrder::new(params.amount, params.token, creation_block)).await?;
    Ok(HttpResponse::Created().json(PaymentOrderResult::from(order)))
}

route!(payment_status => Get "/api/payment/{order_id}" impl OrderStore);
/// Point query for the current status of an order. Shoppers poll this endpoint while waiting for settlement.
pub async fn payment_status<B: OrderStore>(
    path: web::Path<i64>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    trace!("💻️ Received status request for order #{order_id}");
    let order = api
        .order_status(order_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No order with id {order_id}")))?;
    Ok(HttpResponse::Ok().json(OrderStatusResult::from(order)))
}
