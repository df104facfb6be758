use crate::error::AppError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Leagues listed even when the table has no one in them.
pub const LEAGUES: [&str; 4] = ["LCK", "LEC", "LCS", "LTA"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProRosterEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub riot_id: &'static str,
    pub region: &'static str,
    pub role: &'static str,
    pub team: &'static str,
    pub league: &'static str,
}

const fn pro(
    id: &'static str,
    name: &'static str,
    riot_id: &'static str,
    region: &'static str,
    role: &'static str,
    team: &'static str,
    league: &'static str,
) -> ProRosterEntry {
    ProRosterEntry {
        id,
        name,
        riot_id,
        region,
        role,
        team,
        league,
    }
}

// Solo queue accounts as listed on trackingthepros.com.
pub static PRO_PLAYERS: &[ProRosterEntry] = &[
    pro("kiin", "Kiin", "kiin#KR1", "kr", "Top", "Gen.G", "LCK"),
    pro("canyon", "Canyon", "HUANG TONG DAYE#KR1", "kr", "Jungle", "Gen.G", "LCK"),
    pro("chovy", "Chovy", "맞짱깔류민석#KR1", "kr", "Mid", "Gen.G", "LCK"),
    pro("ruler", "Ruler", "황금고블린1#KR1", "kr", "Bot", "Gen.G", "LCK"),
    pro("duro", "Duro", "Duro#Gen", "kr", "Support", "Gen.G", "LCK"),
    pro("zeus", "Zeus", "우제초이#Kr2", "kr", "Top", "Hanwha Life", "LCK"),
    pro("peanut", "Peanut", "Peanut#kr11", "kr", "Jungle", "Hanwha Life", "LCK"),
    pro("zeka", "Zeka", "95190213del#KR1", "kr", "Mid", "Hanwha Life", "LCK"),
    pro("viper", "Viper", "Blue#KR33", "kr", "Bot", "Hanwha Life", "LCK"),
    pro("delight", "Delight", "플레이리스트겨울#KR1", "kr", "Support", "Hanwha Life", "LCK"),
    pro("perfect", "PerfecT", "킹콩출현#킹콩킹콩", "kr", "Top", "KT Rolster", "LCK"),
    pro("cuzz", "Cuzz", "Cuzz#KR1", "kr", "Jungle", "KT Rolster", "LCK"),
    pro("bdd", "Bdd", "기찮게하지마#KR1", "kr", "Mid", "KT Rolster", "LCK"),
    pro("deokdam", "deokdam", "New York#dream", "kr", "Bot", "KT Rolster", "LCK"),
    pro("peter", "Peter", "아름다운 나라#K T", "kr", "Support", "KT Rolster", "LCK"),
    pro("doran", "Doran", "95540172del#KR1", "kr", "Top", "T1", "LCK"),
    pro("oner", "Oner", "오 너#111", "kr", "Jungle", "T1", "LCK"),
    pro("faker", "Faker", "Hide on bush#KR1", "kr", "Mid", "T1", "LCK"),
    pro("gumayusi", "Gumayusi", "JXN1MVc6dAdqVY1I#KR1", "kr", "Bot", "T1", "LCK"),
    pro("keria", "Keria", "역천괴#ker3", "kr", "Support", "T1", "LCK"),
    pro("siwoo", "Siwoo", "TOPKING#asd", "kr", "Top", "Dplus KIA", "LCK"),
    pro("lucid", "Lucid", "DK Lucid#KR1", "kr", "Jungle", "Dplus KIA", "LCK"),
    pro("showmaker", "ShowMaker", "DK ShowMaker#KR1", "kr", "Mid", "Dplus KIA", "LCK"),
    pro("aiming", "Aiming", "아이린#KR1", "kr", "Bot", "Dplus KIA", "LCK"),
    pro("beryl", "BeryL", "BeryL#000", "kr", "Support", "Dplus KIA", "LCK"),
    pro("myrwn", "Myrwn", "Terra Branford#FFVI", "euw1", "Top", "KOI", "LEC"),
    pro("elyoya", "Elyoya", "komanche uchiha#elite", "euw1", "Jungle", "KOI", "LEC"),
    pro("jojopyun", "Jojopyun", "KOIIIIIIIII#1234", "na1", "Mid", "KOI", "LEC"),
    pro("supa", "Supa", "tukaan#tukan", "euw1", "Bot", "KOI", "LEC"),
    pro("alvaro", "Alvaro", "s7R 074#000", "euw1", "Support", "KOI", "LEC"),
    pro("brokenblade", "BrokenBlade", "G2 BrokenBlade#1918", "na1", "Top", "G2 Esports", "LEC"),
    pro("skewmond", "SkewMond", "G2 SkewMond#3327", "euw1", "Jungle", "G2 Esports", "LEC"),
    pro("caps", "Caps", "wEDKca0Gxe#EUW", "euw1", "Mid", "G2 Esports", "LEC"),
    pro("hans_sama", "Hans Sama", "G2 Hans Sama#12838", "euw1", "Bot", "G2 Esports", "LEC"),
    pro("labrov", "Labrov", "G2 Labrov#8085", "euw1", "Support", "G2 Esports", "LEC"),
    pro("canna", "Canna", "칸 나#0211", "kr", "Top", "Karmine Corp", "LEC"),
    pro("yike", "Yike", "KC Yiken#1111", "euw1", "Jungle", "Karmine Corp", "LEC"),
    pro("vladi", "Vladi", "dmsdklb#vivi", "euw1", "Mid", "Karmine Corp", "LEC"),
    pro("caliste", "Caliste", "KC NEXT ADKING#EUW", "euw1", "Bot", "Karmine Corp", "LEC"),
    pro("targamas", "Targamas", "Targamas#5555", "euw1", "Support", "Karmine Corp", "LEC"),
    pro("oscarinin", "Oscarinin", "Byron Love#1v9", "euw1", "Top", "Fnatic", "LEC"),
    pro("razork", "Razork", "Razørk Activoo#razzz", "euw1", "Jungle", "Fnatic", "LEC"),
    pro("poby", "Poby", "XPoby#0207", "euw1", "Mid", "Fnatic", "LEC"),
    pro("upset", "Upset", "FNC Upset22#EUW", "euw1", "Bot", "Fnatic", "LEC"),
    pro("mikyx", "Mikyx", "FNC Mikyx#1998", "euw1", "Support", "Fnatic", "LEC"),
    pro("lot", "Lot", "chenzelot#LOT", "euw1", "Top", "GIANTX", "LEC"),
    pro("jackies", "Jackies", "King Julien XIII#MGDSK", "euw1", "Mid", "GIANTX", "LEC"),
    pro("thanatos", "Thanatos", "C9 Thanatos#KR2", "kr", "Top", "Cloud9", "LCS"),
    pro("blaber", "Blaber", "blaberfish2#NA1", "na1", "Jungle", "Cloud9", "LCS"),
    pro("loki", "Loki", "L0KEY#loki", "kr", "Mid", "Cloud9", "LCS"),
    pro("zven", "Zven", "C9 Zvenn#EUW", "euw1", "Bot", "Cloud9", "LCS"),
    pro("vulcan", "Vulcan", "VLCNN#NA1", "na1", "Support", "Cloud9", "LCS"),
    pro("bwipo", "Bwipo", "red little bird#1810", "kr", "Top", "FlyQuest", "LCS"),
    pro("inspired", "Inspired", "Inspireeed#EUW", "euw1", "Jungle", "FlyQuest", "LCS"),
    pro("quad", "Quad", "Quad#123", "kr", "Mid", "FlyQuest", "LCS"),
    pro("massu", "Massu", "KaiGyt#0187", "na1", "Bot", "FlyQuest", "LCS"),
    pro("busio", "Busio", "Fly Busio#lalu", "kr", "Support", "FlyQuest", "LCS"),
    pro("dhokla", "Dhokla", "Dhokla#NA1", "na1", "Top", "100 Thieves", "LCS"),
    pro("river", "River", "qwerzxcasdg#KR1", "kr", "Jungle", "100 Thieves", "LCS"),
    pro("quid", "Quid", "붐칙칵칙#KR1", "kr", "Mid", "100 Thieves", "LCS"),
    pro("fbi", "FBI", "ADCADC123#NA1", "na1", "Bot", "100 Thieves", "LCS"),
    pro("eyla", "Eyla", "Cartethyia#100", "na1", "Support", "100 Thieves", "LCS"),
    pro("impact", "Impact", "Ang gimori#EUW", "euw1", "Top", "Team Liquid", "LCS"),
    pro("yuuji", "Yuuji", "Yuuji#247", "na1", "Jungle", "Team Liquid", "LCS"),
    pro("apa", "APA", "always plan ahea#TLAPA", "na1", "Mid", "Team Liquid", "LCS"),
    pro("yeon", "Yeon", "TL Yeon#7lol", "na1", "Bot", "Team Liquid", "LCS"),
    pro("corejj", "CoreJJ", "From Iron#1123", "na1", "Support", "Team Liquid", "LCS"),
    pro("srtty", "Srtty", "srtty#143", "na1", "Top", "Lyon", "LTA"),
    pro("oddie", "Oddie", "fYQ63qPMKID2rTtD#EUW", "euw1", "Jungle", "Lyon", "LTA"),
    pro("saint", "Saint", "Saint#KR0", "kr", "Mid", "Lyon", "LTA"),
    pro("hena", "Hena", "밤이싫어#kr9", "kr", "Bot", "Lyon", "LTA"),
    pro("lyonz", "Lyonz", "el oxxo merlo#LYON", "kr", "Support", "Lyon", "LTA"),
];

/// Looks up a pro by short key, ignoring case.
pub fn find_pro(id: &str) -> Result<&'static ProRosterEntry, AppError> {
    let key = id.trim().to_lowercase();
    PRO_PLAYERS
        .iter()
        .find(|p| p.id == key)
        .ok_or_else(|| AppError::UnknownProPlayer(id.to_string()))
}

pub fn pros_in_league(league: &str) -> Vec<&'static ProRosterEntry> {
    PRO_PLAYERS
        .iter()
        .filter(|p| p.league.eq_ignore_ascii_case(league))
        .collect()
}

pub fn pros_on_team(team: &str) -> Vec<&'static ProRosterEntry> {
    PRO_PLAYERS
        .iter()
        .filter(|p| p.team.eq_ignore_ascii_case(team))
        .collect()
}

/// League → sorted team names.
pub fn teams_by_league() -> BTreeMap<&'static str, BTreeSet<&'static str>> {
    let mut teams: BTreeMap<&'static str, BTreeSet<&'static str>> = BTreeMap::new();
    for player in PRO_PLAYERS {
        teams.entry(player.league).or_default().insert(player.team);
    }
    teams
}

/// League → team → players in table order. The four main leagues are always present.
pub fn roster_by_league() -> BTreeMap<&'static str, BTreeMap<&'static str, Vec<&'static ProRosterEntry>>> {
    let mut roster: BTreeMap<_, BTreeMap<_, Vec<_>>> =
        LEAGUES.iter().map(|league| (*league, BTreeMap::new())).collect();

    for player in PRO_PLAYERS {
        roster
            .entry(player.league)
            .or_default()
            .entry(player.team)
            .or_default()
            .push(player);
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for player in PRO_PLAYERS {
            assert_eq!(player.id, player.id.to_lowercase());
            assert!(seen.insert(player.id), "duplicate key {}", player.id);
            assert!(player.riot_id.contains('#'), "{} has no tag", player.id);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let faker = find_pro("FAKER").unwrap();
        assert_eq!(faker.name, "Faker");
        assert_eq!(faker.team, "T1");
        assert_eq!(faker.region, "kr");
    }

    #[test]
    fn unknown_key_is_a_not_found_error() {
        let err = find_pro("nobody").unwrap_err();
        assert!(matches!(err, AppError::UnknownProPlayer(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn teams_and_leagues_group_the_table() {
        let t1 = pros_on_team("t1");
        assert_eq!(t1.len(), 5);
        assert!(t1.iter().all(|p| p.league == "LCK"));

        let teams = teams_by_league();
        assert!(teams["LEC"].contains("G2 Esports"));
        assert_eq!(pros_in_league("lta").len(), 5);

        let roster = roster_by_league();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster["LCK"]["T1"].len(), 5);
    }
}
