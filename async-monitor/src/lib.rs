pub mod collector;
pub mod config;
pub mod producer_monitor;
pub mod reporter;
pub mod serve;
