pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod payment_worker;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
