use epg_common::Address;
use log::trace;
use sqlx::SqliteConnection;

use crate::db_types::{NewOrder, Order, OrderStatusType};

/// Inserts a new order with the given receiving address, returning the stored record.
///
/// The UNIQUE constraint on `address` enforces the one-time-use address invariant at the storage layer.
pub async fn insert_order(
    order: NewOrder,
    address: Address,
    conn: &mut SqliteConnection,
) -> Result<Order, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                address,
                expected_amount,
                token,
                creation_block
            ) VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(address)
    .bind(order.expected_amount)
    .bind(order.token)
    .bind(order.creation_block)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

/// Returns every order currently in `status`. No ordering is guaranteed.
pub async fn fetch_orders_by_status(
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let orders =
        sqlx::query_as("SELECT * FROM orders WHERE status = $1").bind(status.to_string()).fetch_all(conn).await?;
    trace!("📝️ {} orders with status {status}", orders.len());
    Ok(orders)
}

/// The narrow `Pending` → `Paid` transition.
///
/// The `status = 'Pending'` guard makes the call idempotent: re-marking a paid order, or marking an id that does not
/// exist, matches zero rows and returns `None` instead of failing. Nothing else on the row is writable through this
/// path.
pub async fn mark_paid(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        "UPDATE orders SET status = 'Paid', updated_at = CURRENT_TIMESTAMP WHERE id = $1 AND status = 'Pending' \
         RETURNING *",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(order)
}
