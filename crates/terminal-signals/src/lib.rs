//! Rule-based signal detection over computed indicator series.

pub mod engine;

pub use engine::SignalEngine;
