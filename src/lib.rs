//! Ranked season review for League of Legends players.
//!
//! Match history comes from the Riot API ([`api`]), is reduced to season
//! stats and badges ([`analysis`]), then turned into roast postcards
//! ([`narrative`]). [`pipeline`] wires the steps together for both the
//! CLI and the HTTP service ([`server`]).

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod error;
pub mod narrative;
pub mod pipeline;
pub mod progress;
pub mod rate_limit;
pub mod roster;
pub mod server;
