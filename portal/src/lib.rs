//! Portal library modules: auth session, dashboard, product table and
//! weather viewer, plus the adapters that connect them to HTTP services and
//! the terminal.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
