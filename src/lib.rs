//! Core library for the `drench` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, config-file merging, the record corpus and its
//! random samplers, the delivery strategies with their completion
//! tracking, the transport seam, and the measurement types. The primary
//! user-facing interface is the `drench` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod corpus;
pub mod error;
pub mod processor;
pub mod report;
pub mod strategy;
pub mod transport;
