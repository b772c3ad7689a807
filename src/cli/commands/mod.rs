pub mod attendance;
pub mod catalog;
pub mod config;
pub mod db;
pub mod distribution;
pub mod init;
pub mod ledger;
pub mod log;
pub mod schedule;
pub mod summary;
