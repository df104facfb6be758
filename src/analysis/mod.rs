pub mod accumulator;
pub mod achievements;
pub mod aggregator;
pub mod champion_stats;
pub mod extractor;
pub mod streak;

pub use accumulator::{accumulate, RawStatSample};
pub use achievements::{classify, Achievement, Badge};
pub use aggregator::{aggregate, AggregatedStats, TopChampion};
pub use extractor::{extract_opponents, frequent_opponents, EncounteredPlayer};
