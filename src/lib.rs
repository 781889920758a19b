//! Capacity planning for agile teams.
//!
//! This crate computes per-member and per-sprint capacity for Program
//! Increments from sprint dates, holidays, company days, individual absences
//! and capacity adjustments, and serves the results over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
