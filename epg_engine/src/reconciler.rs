//! The order-reconciliation core.
//!
//! A [`Reconciler`] owns one pass over the pending orders: list them, look up each order's on-chain balance, and
//! settle the ones whose receiving address holds at least the expected amount. It has no timer of its own:
//! [`Reconciler::run_once`] executes exactly one tick, so a supervising task schedules ticks in production and tests
//! drive them deterministically.
use epg_common::{AmountError, TokenAmount};
use log::*;
use thiserror::Error;

use crate::{
    assets::{AssetDescriptor, AssetKind, AssetRegistry},
    db_types::{Order, OrderStatusType},
    events::{EventProducers, OrderSettledEvent},
    traits::{ChainReader, ChainReaderError, OrderStore, OrderStoreError},
};

/// What happened during one reconciliation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Number of pending orders found at the start of the tick.
    pub pending: usize,
    /// Orders transitioned to `Paid` during this tick.
    pub settled: usize,
    /// Orders whose balance check failed. They stay pending and are retried on the next tick.
    pub failed: usize,
}

/// Why a single order's balance check failed. None of these abort the tick; the order is retried next time around.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("No asset is configured for token symbol '{0}'")]
    UnknownAsset(String),
    #[error("Stored expected amount is unusable: {0}")]
    BadExpectedAmount(#[from] AmountError),
    #[error(transparent)]
    Chain(#[from] ChainReaderError),
    #[error(transparent)]
    Store(#[from] OrderStoreError),
}

pub struct Reconciler<B, C> {
    db: B,
    chain: C,
    assets: AssetRegistry,
    producers: EventProducers,
}

impl<B, C> Reconciler<B, C>
where
    B: OrderStore,
    C: ChainReader,
{
    pub fn new(db: B, chain: C, assets: AssetRegistry, producers: EventProducers) -> Self {
        Self { db, chain, assets, producers }
    }

    /// Executes one reconciliation tick.
    ///
    /// Listing failures abort the tick with an error and nothing is processed. Per-order failures are contained:
    /// they are logged, counted in the summary, and never affect the other orders in the batch.
    pub async fn run_once(&self) -> Result<TickSummary, OrderStoreError> {
        debug!("🔄️ Reconciliation tick started");
        let pending = self.db.fetch_orders_by_status(OrderStatusType::Pending).await?;
        let mut summary = TickSummary { pending: pending.len(), ..TickSummary::default() };
        if pending.is_empty() {
            debug!("🔄️ No pending orders at the moment");
            return Ok(summary);
        }
        info!("🔄️ Checking {} pending orders", pending.len());
        for order in pending {
            let id = order.id;
            match self.check_order(&order).await {
                Ok(Some(paid)) => {
                    summary.settled += 1;
                    self.call_order_settled_hook(paid).await;
                },
                Ok(None) => {},
                Err(e) => {
                    summary.failed += 1;
                    warn!("🔄️ Balance check for order #{id} failed and will be retried next tick. {e}");
                },
            }
        }
        debug!(
            "🔄️ Reconciliation tick complete. {} pending, {} settled, {} failed",
            summary.pending, summary.settled, summary.failed
        );
        Ok(summary)
    }

    /// Checks a single order's receiving address and settles the order when the balance covers the expected amount.
    ///
    /// Returns the settlement event when this tick transitioned the order, and `None` when the order is not (yet)
    /// covered, or when a concurrent writer got there first. `mark_paid` is idempotent, so the double-settlement
    /// case quietly resolves to a no-op.
    async fn check_order(&self, order: &Order) -> Result<Option<OrderSettledEvent>, ReconcileError> {
        let asset =
            self.assets.get(&order.token).ok_or_else(|| ReconcileError::UnknownAsset(order.token.clone()))?;
        let expected = asset.base_units(&order.expected_amount)?;
        let received = self.balance_for(asset, order).await?;
        trace!("🔄️ Order #{}: expected {expected}, received {received}", order.id);
        if received < expected {
            return Ok(None);
        }
        // >= rather than ==: the address is exclusive to this order, so an overpayment still belongs to it
        let settled = self.db.mark_paid(order.id).await?;
        if let Some(order) = &settled {
            info!("🏁 Order #{} settled: {} received at {}", order.id, asset.display_amount(received), order.address);
        }
        Ok(settled.map(|order| OrderSettledEvent::new(order, received)))
    }

    async fn balance_for(
        &self,
        asset: &AssetDescriptor,
        order: &Order,
    ) -> Result<TokenAmount, ChainReaderError> {
        match &asset.kind {
            AssetKind::Native => self.chain.native_balance(&order.address).await,
            AssetKind::Erc20 { contract } => self.chain.token_balance(contract, &order.address).await,
        }
    }

    async fn call_order_settled_hook(&self, event: OrderSettledEvent) {
        for producer in &self.producers.order_settled_producer {
            debug!("🔄️ Notifying order settled hook subscribers");
            producer.publish_event(event.clone()).await;
        }
    }
}
