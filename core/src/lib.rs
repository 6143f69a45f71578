//! R-Mobile demo dataset toolkit: synthetic customers and call records,
//! a flat-file to SQLite loader, and a read-only query tool.

pub mod agent;
pub mod call_record;
pub mod config;
pub mod customer;
pub mod error;
pub mod identity;
pub mod loader;
pub mod phone;
pub mod pipeline;
pub mod plan;
pub mod query;
pub mod rng;
pub mod store;
pub mod tabular;
pub mod tool_rpc;
pub mod types;
