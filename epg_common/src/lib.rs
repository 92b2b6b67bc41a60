mod address;
mod amount;
pub mod op;
mod secret;
mod token_amount;

pub use address::{Address, AddressParseError};
pub use amount::{from_base_units, to_base_units, AmountError};
pub use secret::Secret;
pub use token_amount::TokenAmount;
