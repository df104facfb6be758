use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Ranked solo/duo queue id in match-v5.
pub const RANKED_SOLO_QUEUE_ID: i32 = 420;

/// Reads a field that upstream sometimes sends as null, negative or the wrong
/// type; anything that does not fit `T` becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

// Account V1 response
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

// League V4 response (one entry per queue)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    #[serde(default)]
    pub queue_type: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub league_points: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
}

// Match V5 response. Upstream payloads are occasionally truncated or carry
// nulls, so every block is optional and every number defaults to zero.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MatchDto {
    #[serde(default)]
    pub metadata: Option<MatchMetadata>,
    #[serde(default)]
    pub info: Option<MatchInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Seconds.
    #[serde(default, deserialize_with = "lenient")]
    pub game_duration: i64,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient")]
    pub game_creation: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub queue_id: i32,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    #[serde(default)]
    pub puuid: String,
    #[serde(default)]
    pub riot_id_game_name: Option<String>,
    #[serde(default)]
    pub summoner_name: Option<String>,
    #[serde(default)]
    pub champion_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub team_id: i32,
    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    #[serde(default, deserialize_with = "lenient")]
    pub win: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub kills: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub deaths: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub assists: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub total_minions_killed: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub neutral_minions_killed: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub total_damage_dealt_to_champions: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub vision_score: u32,
}

impl MatchDto {
    pub fn match_id(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.match_id.as_str())
    }

    pub fn is_ranked_solo(&self) -> bool {
        self.info
            .as_ref()
            .map(|info| info.queue_id == RANKED_SOLO_QUEUE_ID)
            .unwrap_or(false)
    }
}

impl ParticipantDto {
    /// Name shown to players: the Riot id game name, else the legacy summoner name.
    pub fn display_name(&self) -> Option<&str> {
        self.riot_id_game_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.summoner_name.as_deref().filter(|name| !name.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_numbers_default_to_zero() {
        let dto: MatchDto = serde_json::from_value(json!({
            "metadata": { "matchId": "NA1_1" },
            "info": {
                "queueId": 420,
                "participants": [
                    { "puuid": "a", "win": true },
                    { "puuid": "b", "kills": 3, "championName": "Ahri" }
                ]
            }
        }))
        .unwrap();

        let info = dto.info.as_ref().unwrap();
        assert_eq!(info.game_duration, 0);
        assert_eq!(info.participants[0].kills, 0);
        assert_eq!(info.participants[0].champion_name, None);
        assert_eq!(info.participants[1].kills, 3);
        assert!(dto.is_ranked_solo());
        assert_eq!(dto.match_id(), Some("NA1_1"));
    }

    #[test]
    fn malformed_numbers_default_to_zero() {
        let dto: MatchDto = serde_json::from_value(json!({
            "info": {
                "gameDuration": 1800,
                "queueId": 420,
                "participants": [
                    { "puuid": "a", "win": null, "kills": -1, "deaths": "2",
                      "assists": 4, "visionScore": null, "totalDamageDealtToChampions": -50 }
                ]
            }
        }))
        .unwrap();

        let p = &dto.info.as_ref().unwrap().participants[0];
        assert_eq!(p.kills, 0);
        assert_eq!(p.deaths, 0);
        assert_eq!(p.assists, 4);
        assert_eq!(p.vision_score, 0);
        assert_eq!(p.total_damage_dealt_to_champions, 0);
        assert!(!p.win);

        // The game still counts.
        let raw = crate::analysis::accumulate(std::slice::from_ref(&dto), "a");
        assert_eq!(raw.total_games, 1);
        assert_eq!(raw.wins, 0);
    }

    #[test]
    fn match_without_info_still_parses() {
        let dto: MatchDto = serde_json::from_value(json!({ "metadata": { "matchId": "x" } })).unwrap();
        assert!(dto.info.is_none());
        assert!(!dto.is_ranked_solo());
    }

    #[test]
    fn display_name_prefers_riot_id() {
        let p: ParticipantDto = serde_json::from_value(json!({
            "puuid": "a",
            "riotIdGameName": "Faker",
            "summonerName": "Hide on bush"
        }))
        .unwrap();
        assert_eq!(p.display_name(), Some("Faker"));

        let legacy: ParticipantDto =
            serde_json::from_value(json!({ "puuid": "b", "riotIdGameName": "", "summonerName": "Old" })).unwrap();
        assert_eq!(legacy.display_name(), Some("Old"));
    }
}
