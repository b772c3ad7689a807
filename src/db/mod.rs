pub mod catalog;
pub mod ledger;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod schedule;
pub mod signin;
pub mod stats;
