//! Core library for the `tgstat` CLI.
//!
//! This crate provides the building blocks used by the binary: the pure
//! per-stream metric aggregator, the snapshot feed, the collector service,
//! configuration parsing, and metric sinks. The primary user-facing
//! interface is the `tgstat` command-line application; library APIs may
//! evolve as the tool grows.
pub mod args;
pub mod config;
pub mod error;
pub mod feed;
pub mod logger;
pub mod shutdown;
pub mod sinks;
pub mod stats;
pub mod summary;
