//! The two collaborator contracts the reconciliation core depends on.
//!
//! [`OrderStore`] is the durable order mapping; [`ChainReader`] is read-only access to a blockchain node. The
//! reconciler is generic over both, so tests can drive it with stubs and individual deployments can swap backends.
mod chain_reader;
mod order_store;

pub use chain_reader::{ChainReader, ChainReaderError};
pub use order_store::{OrderStore, OrderStoreError};
