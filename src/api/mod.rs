pub mod client;
pub mod endpoints;
pub mod models;
pub mod rank;
pub mod source;

pub use client::RiotApiClient;
pub use endpoints::{Platform, RiotId};
pub use source::{MatchSource, RiotSession};
