use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not reach the node: {0}")]
    Transport(String),
    #[error("Node query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Node returned RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Could not interpret node response: {0}")]
    InvalidResponse(String),
    #[error("The node response contained no result")]
    EmptyResponse,
}
