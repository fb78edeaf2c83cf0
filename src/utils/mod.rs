//! Utility functions and helpers for folio-relay.
//!
//! - `logging`: Tracing initialization and credential redaction for logs.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
