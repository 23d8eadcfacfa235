//! Near-real-time quote acquisition.
//!
//! Orchestrated as cache → provider chain: the [`QuoteService`] answers
//! each refresh cycle from the [`QuoteCache`] where fresh, and sends one
//! batched fetch through the [`ProviderChain`] (primary snapshot
//! provider, gateway live feed as fallback) for the misses.

pub mod cache;
pub mod chain;
pub mod service;
pub mod snapshot;

pub use cache::QuoteCache;
pub use chain::ProviderChain;
pub use service::QuoteService;
pub use snapshot::EastmoneySpot;
