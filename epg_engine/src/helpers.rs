use epg_common::Address;
use rand::RngCore;

/// Generates a fresh receiving address for a new order.
///
/// Key generation and custody are the wallet collaborator's concern; the gateway only needs an address that is
/// unique to the order and watches it for incoming funds.
pub fn new_receiving_address() -> Address {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    Address::from_bytes(&bytes)
}
