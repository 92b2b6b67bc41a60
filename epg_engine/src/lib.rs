//! EVM Payment Gateway engine
//!
//! The engine holds everything the gateway knows about orders and settlement, independent of the HTTP surface:
//!
//! 1. The order data model and SQLite persistence ([`db_types`], [`mod@sqlite`]). You should never need to touch the
//!    database directly; go through the [`OrderApi`] or the traits instead.
//! 2. The collaborator contracts ([`traits`]): [`OrderStore`] for durable order state and [`ChainReader`] for
//!    read-only node access. The reconciler is generic over both so tests can drive it with stubs.
//! 3. The reconciliation core ([`reconciler`]): one deterministic tick at a time, scheduled externally.
//! 4. Settlement events ([`events`]): a small async pub-sub so operators and collaborators can hook order
//!    settlement without the engine knowing about them.
pub mod assets;
pub mod db_types;
pub mod events;
pub mod helpers;
mod order_api;
mod reconciler;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use order_api::{OrderApi, OrderApiError};
pub use reconciler::{ReconcileError, Reconciler, TickSummary};
#[cfg(feature = "sqlite")]
pub use sqlite::{run_migrations, SqliteDatabase};
pub use traits::{ChainReader, ChainReaderError, OrderStore, OrderStoreError};
