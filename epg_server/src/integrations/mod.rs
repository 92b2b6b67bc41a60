mod ethereum;

pub use ethereum::EthereumReader;
