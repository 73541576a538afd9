//! Payroll engine for hourly employees.
//!
//! This crate turns raw shift punches into per-employee hour and pay tables.
//! Every worked minute is classified as day or night, weekly overtime is split
//! at minute granularity, and the Paddington schedule premium is applied on top
//! of per-employee day/night rates.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod tables;
