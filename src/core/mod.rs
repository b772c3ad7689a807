pub mod attendance;
pub mod catalog;
pub mod ledger;
pub mod log;
pub mod redistribute;
pub mod restore;
pub mod schedule;
pub mod summary;
pub mod sweep;
