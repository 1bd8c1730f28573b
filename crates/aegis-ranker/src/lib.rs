//! Reqwest-backed implementation of the engine's `Ranker` seam.

pub mod client;

pub use client::{RankerClient, DEFAULT_TIMEOUT};
