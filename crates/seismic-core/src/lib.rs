//! Core types and definitions for the seismic wave effect.
//!
//! This crate defines the vocabulary shared across the other crates:
//! configuration, wave records, published snapshots, commands, and errors.
//! It has no dependency on any renderer or runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod state;
pub mod types;
pub mod uniform;

pub use error::{Result, SeismicError};
