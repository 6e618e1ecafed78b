//! Shared types and the reference recipe store for brewlog.

pub mod catalog;
pub mod config;
pub mod error;
pub mod platform;
pub mod protocol;
pub mod query;
pub mod state;
