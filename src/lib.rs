//! devsweep: a scheduled background job that scans configured database
//! tables for leftover development/staging URLs and mails a bounded summary
//! report to an administrator.

pub mod config;
pub mod db;
pub mod errors;
pub mod mail;
pub mod models;
pub mod schedule;
pub mod services;
