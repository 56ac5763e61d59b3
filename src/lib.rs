//! Expense Tracker - personal expense tracking from the command line
//!
//! This library provides the core functionality for the `tracker` binary:
//! recording expenses in a JSON data file, listing and summarizing them, and
//! exporting them to CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, ids, dates, amounts)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (queries, aggregation, mutations)
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `logging`: Event log
//! - `cli`: Command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::paths::TrackerPaths;
//! use expense_tracker::logging::EventLogger;
//! use expense_tracker::services::{ExpenseService, ListFilter};
//! use expense_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let logger = EventLogger::new(paths.log_file());
//! let storage = Storage::new(paths);
//! let expenses = ExpenseService::new(&storage, &logger).list(&ListFilter::new())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
