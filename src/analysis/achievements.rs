use super::aggregator::AggregatedStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
}

impl Achievement {
    fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Achievement {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Badge rules, evaluated in declaration order. Each rule reads only the
/// aggregated stats and fires independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    TheInter,
    VisionAllergic,
    TiltMaster,
    Specialist,
    NoLife,
    MinionHater,
    KdaPlayer,
    DedicatedLoser,
}

impl Badge {
    pub const ALL: [Badge; 8] = [
        Badge::TheInter,
        Badge::VisionAllergic,
        Badge::TiltMaster,
        Badge::Specialist,
        Badge::NoLife,
        Badge::MinionHater,
        Badge::KdaPlayer,
        Badge::DedicatedLoser,
    ];

    pub fn evaluate(self, stats: &AggregatedStats) -> Option<Achievement> {
        match self {
            Badge::TheInter => (stats.avg_deaths > 8.0).then(|| {
                Achievement::new(
                    "The Inter",
                    format!("Died {:.1} times per game on average", stats.avg_deaths),
                )
            }),
            Badge::VisionAllergic => (stats.avg_vision < 15.0).then(|| {
                Achievement::new(
                    "Vision Allergic",
                    format!("Only {:.1} vision score per game", stats.avg_vision),
                )
            }),
            Badge::TiltMaster => (stats.max_loss_streak >= 7).then(|| {
                Achievement::new(
                    "Tilt Master",
                    format!("Lost {} games in a row", stats.max_loss_streak),
                )
            }),
            Badge::Specialist => {
                let main = stats.top_champions.first()?;
                (stats.champion_diversity < 0.3).then(|| {
                    Achievement::new(
                        format!("{} Specialist", main.name),
                        format!("One-tricked {} ({} games)", main.name, main.games),
                    )
                })
            }
            Badge::NoLife => (stats.total_games > 200).then(|| {
                Achievement::new(
                    "No Life",
                    format!("{} ranked games this year", stats.total_games),
                )
            }),
            Badge::MinionHater => (stats.cs_per_min < 5.0).then(|| {
                Achievement::new("Minion Hater", format!("Only {:.1} CS/min", stats.cs_per_min))
            }),
            Badge::KdaPlayer => (stats.kda > 3.5 && stats.win_rate < 48.0).then(|| {
                Achievement::new(
                    "KDA Player",
                    format!("{} KDA but {:.1}% winrate", rounded(stats.kda), stats.win_rate),
                )
            }),
            Badge::DedicatedLoser => {
                let main = stats.top_champions.first()?;
                (main.win_rate < 45.0).then(|| {
                    Achievement::new(
                        "Dedicated Loser",
                        format!("{:.1}% WR on {}", main.win_rate, main.name),
                    )
                })
            }
        }
    }
}

/// An already-rounded value as it reads: 3.6, 3.67, 4.0.
fn rounded(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

pub fn classify(stats: &AggregatedStats) -> Vec<Achievement> {
    Badge::ALL
        .iter()
        .filter_map(|badge| badge.evaluate(stats))
        .collect()
}
