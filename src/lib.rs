//! # Playsheet
//!
//! A local play-by-play logger and tendency tracker for football coaches.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (plays, personnel groups, reports)
//! - **classify**: Success and explosive-play classification rules
//! - **calculate**: Filtering and tendency metric computation
//! - **storage**: Flat-file play log (CSV or JSONL)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod classify;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
