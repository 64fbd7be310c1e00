//! RUIAN Client Core Library
//!
//! This crate provides a typed client for the RUIAN address registry
//! API at ruian.fnx.io (Registr územní identifikace, adres a
//! nemovitostí — the Czech national address register).
//!
//! # Features
//! - Validate addresses and single address points by RUIAN id
//! - List regions, municipalities, streets and address points
//! - Municipality autocomplete with prefix-first ranking
//! - TTL cache for successful responses behind a pluggable store

pub mod cache;
pub mod client;
pub mod error;
pub mod ruian;
pub mod types;

// Re-export main types for convenience
pub use cache::{CacheStore, MemoryCache};
pub use client::ClientConfig;
pub use error::{Result, RuianError};
pub use ruian::{RuianClient, ValidateParams};
pub use types::{
    AddressHierarchy, Municipality, Place, Region, Street, ValidateResult, ValidateStatus,
    ValidateWithPlaces, ValidatedPlace,
};
