// Platform routing and URL builders for the Riot endpoints we use.
//
// account-v1 and match-v5 are served from regional clusters, league-v4 from
// the platform host. The two regional tables differ for the SEA platforms.

use crate::error::AppError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform(String);

impl Platform {
    pub fn new(id: &str) -> Self {
        Platform(id.trim().to_lowercase())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// Cluster serving account-v1 (americas, europe, asia).
    pub fn account_routing(&self) -> &'static str {
        match self.0.as_str() {
            "na1" | "br1" | "la1" | "la2" => "americas",
            "euw1" | "eun1" | "tr1" | "ru" => "europe",
            "kr" | "jp1" => "asia",
            "oc1" | "sg2" | "th2" | "tw2" | "vn2" | "ph2" => "asia",
            _ => "americas",
        }
    }

    /// Cluster serving match-v5 (adds sea).
    pub fn match_routing(&self) -> &'static str {
        match self.0.as_str() {
            "na1" | "br1" | "la1" | "la2" => "americas",
            "euw1" | "eun1" | "tr1" | "ru" => "europe",
            "kr" | "jp1" => "asia",
            "oc1" | "sg2" | "th2" | "tw2" | "vn2" | "ph2" => "sea",
            _ => "americas",
        }
    }

    /// Tag assumed when a Riot id is typed without `#TAG`.
    pub fn default_tag(&self) -> &'static str {
        match self.0.as_str() {
            "na1" => "NA1",
            "euw1" => "EUW",
            "eun1" => "EUNE",
            "kr" => "KR",
            "br1" => "BR1",
            "la1" => "LAN",
            "la2" => "LAS",
            "oc1" => "OCE",
            "tr1" => "TR1",
            "ru" => "RU",
            "jp1" => "JP1",
            "sg2" => "SG2",
            "th2" => "TH2",
            "tw2" => "TW2",
            "vn2" => "VN2",
            "ph2" => "PH2",
            _ => "NA1",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl RiotId {
    pub fn parse(input: &str, platform: &Platform) -> Result<Self, AppError> {
        let input = input.trim();
        let (game_name, tag_line) = match input.split_once('#') {
            Some((name, tag)) => (name.trim(), tag.trim()),
            None => (input, platform.default_tag()),
        };

        if game_name.is_empty() {
            return Err(AppError::InvalidRiotId(input.to_string()));
        }

        let tag_line = if tag_line.is_empty() {
            platform.default_tag()
        } else {
            tag_line
        };

        Ok(RiotId {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// Minimal percent-encoding for path segments (Riot ids carry spaces and
/// non-ASCII characters).
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

pub fn account_by_riot_id_url(platform: &Platform, riot_id: &RiotId) -> String {
    format!(
        "https://{}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
        platform.account_routing(),
        encode_segment(&riot_id.game_name),
        encode_segment(&riot_id.tag_line)
    )
}

pub fn league_entries_url(platform: &Platform, puuid: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/league/v4/entries/by-puuid/{}",
        platform.id(),
        puuid
    )
}

pub fn match_ids_url(platform: &Platform, puuid: &str, count: usize, start_time: Option<i64>) -> String {
    let mut url = format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?type=ranked&count={}",
        platform.match_routing(),
        puuid,
        count
    );
    if let Some(start) = start_time {
        url.push_str(&format!("&startTime={}", start));
    }
    url
}

pub fn match_url(platform: &Platform, match_id: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
        platform.match_routing(),
        match_id
    )
}
