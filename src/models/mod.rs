pub mod assignment;
pub mod catalog;
pub mod outcome;
pub mod schedule;
pub mod signin;
pub mod summary;
