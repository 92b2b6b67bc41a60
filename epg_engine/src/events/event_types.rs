use epg_common::TokenAmount;
use serde::{Deserialize, Serialize};

use crate::db_types::Order;

/// Emitted once for every order the reconciler transitions to `Paid`.
///
/// `received` is the on-chain balance observed at settlement time, in smallest units; it is at least the expected
/// amount and may exceed it (overpayment settles the order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSettledEvent {
    pub order: Order,
    pub received: TokenAmount,
}

impl OrderSettledEvent {
    pub fn new(order: Order, received: TokenAmount) -> Self {
        Self { order, received }
    }
}
