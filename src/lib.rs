// folio-relay - Portfolio assistant chat relay
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod metrics;
pub mod models;
pub mod relay;
pub mod server;
pub mod upstream;
pub mod utils;
