use epg_common::{Address, TokenAmount};
use epg_engine::{
    db_types::{NewOrder, Order, OrderStatusType},
    traits::{ChainReader, ChainReaderError, OrderStore, OrderStoreError},
};
use mockall::mock;

mock! {
    pub Store {}
    impl OrderStore for Store {
        async fn insert_order(&self, order: NewOrder, address: Address) -> Result<Order, OrderStoreError>;
        async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderStoreError>;
        async fn fetch_orders_by_status(&self, status: OrderStatusType) -> Result<Vec<Order>, OrderStoreError>;
        async fn mark_paid(&self, id: i64) -> Result<Option<Order>, OrderStoreError>;
    }
}

mock! {
    pub Chain {}
    impl ChainReader for Chain {
        async fn current_block(&self) -> Result<u64, ChainReaderError>;
        async fn native_balance(&self, address: &Address) -> Result<TokenAmount, ChainReaderError>;
        async fn token_balance(&self, contract: &Address, owner: &Address) -> Result<TokenAmount, ChainReaderError>;
    }
}
