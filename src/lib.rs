//! `celeb-advantage` library crate.
//!
//! Collects Celebrity Bucks valuations and Astro-Seek biographies into one
//! row per celebrity and exports the table to CSV.
//!
//! The binary (`celeb`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes or touching the network
//! - extractors can be exercised against synthetic page views

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod progress;
pub mod record;
pub mod report;
