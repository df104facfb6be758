use crate::api::models::{MatchDto, ParticipantDto};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_CHAMPION: &str = "Unknown";

/// The fields the accumulator needs from one match, for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLine {
    pub won: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub creep_score: u32,
    pub duration_secs: i64,
    pub vision_score: u32,
    pub damage_to_champions: u64,
    pub team_damage_to_champions: u64,
    pub champion: String,
}

impl GameLine {
    /// CS per minute, or `None` for a zero-length game.
    pub fn cs_per_min(&self) -> Option<f64> {
        (self.duration_secs > 0).then(|| self.creep_score as f64 / self.minutes())
    }

    pub fn minutes(&self) -> f64 {
        self.duration_secs as f64 / 60.0
    }

    /// Share of the team's champion damage in percent, or `None` when the
    /// team dealt none.
    pub fn damage_share(&self) -> Option<f64> {
        (self.team_damage_to_champions > 0).then(|| {
            self.damage_to_champions as f64 / self.team_damage_to_champions as f64 * 100.0
        })
    }
}

/// A player met across the analysed matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounteredPlayer {
    pub puuid: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub encounters: u32,
}

fn participants(game: &MatchDto) -> Option<&[ParticipantDto]> {
    let participants = game.info.as_ref()?.participants.as_slice();
    (participants.len() >= 2).then_some(participants)
}

fn find_player<'a>(participants: &'a [ParticipantDto], puuid: &str) -> Option<&'a ParticipantDto> {
    if puuid.is_empty() {
        return None;
    }
    participants.iter().find(|p| p.puuid == puuid)
}

/// `None` when the match is broken or the player did not play in it.
pub fn extract_game(game: &MatchDto, puuid: &str) -> Option<GameLine> {
    let participants = participants(game)?;
    let player = find_player(participants, puuid)?;

    let team_damage = participants
        .iter()
        .filter(|p| p.team_id == player.team_id)
        .map(|p| p.total_damage_dealt_to_champions)
        .sum();

    Some(GameLine {
        won: player.win,
        kills: player.kills,
        deaths: player.deaths,
        assists: player.assists,
        creep_score: player.total_minions_killed + player.neutral_minions_killed,
        duration_secs: game.info.as_ref().map(|i| i.game_duration).unwrap_or(0),
        vision_score: player.vision_score,
        damage_to_champions: player.total_damage_dealt_to_champions,
        team_damage_to_champions: team_damage,
        champion: player
            .champion_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_CHAMPION.to_string()),
    })
}

/// Distinct opponents (other team) in first-seen order, with how often they
/// were met and the role they last played.
pub fn extract_opponents(matches: &[MatchDto], puuid: &str) -> Vec<EncounteredPlayer> {
    let mut players: Vec<EncounteredPlayer> = Vec::new();

    for game in matches {
        let Some(participants) = participants(game) else {
            continue;
        };
        let Some(me) = find_player(participants, puuid) else {
            continue;
        };

        for opponent in participants
            .iter()
            .filter(|p| p.team_id != me.team_id && !p.puuid.is_empty())
        {
            let role = Some(opponent.team_position.clone()).filter(|r| !r.is_empty());
            let name = opponent.display_name().map(str::to_string);

            match players.iter_mut().find(|p| p.puuid == opponent.puuid) {
                Some(seen) => {
                    seen.encounters += 1;
                    if role.is_some() {
                        seen.role = role;
                    }
                    if name.is_some() {
                        seen.name = name;
                    }
                }
                None => players.push(EncounteredPlayer {
                    puuid: opponent.puuid.clone(),
                    name,
                    role,
                    encounters: 1,
                }),
            }
        }
    }

    players
}

/// The `limit` opponents met most often; ties keep first-seen order.
pub fn frequent_opponents(matches: &[MatchDto], puuid: &str, limit: usize) -> Vec<EncounteredPlayer> {
    let mut players = extract_opponents(matches, puuid);
    players.sort_by(|a, b| b.encounters.cmp(&a.encounters));
    players.truncate(limit);
    players
}
