use crate::analysis::{Achievement, AggregatedStats, EncounteredPlayer};
use crate::api::rank::{compare_ranks, RankTier};
use crate::narrative::Postcard;
use crate::pipeline::{AnalysisReport, ProInfo};
use crate::roster::ProRosterEntry;
use colored::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct StatRow {
    stat: String,
    value: String,
}

#[derive(Tabled)]
struct ChampionRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    games: String,
    win_rate: String,
}

#[derive(Tabled)]
struct OpponentRow {
    #[tabled(rename = "#")]
    rank: String,
    player: String,
    role: String,
    games: String,
}

#[derive(Tabled)]
struct ComparisonRow {
    stat: String,
    you: String,
    pro: String,
}

#[derive(Tabled)]
struct RosterRow {
    team: String,
    player: String,
    role: String,
    #[tabled(rename = "key")]
    id: String,
}

fn header(title: &str, width: usize) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(width).cyan());
}

fn win_rate_cell(win_rate: f64) -> String {
    let text = format!("{:.1}%", win_rate);
    if win_rate >= 55.0 {
        text.green().to_string()
    } else if win_rate < 45.0 {
        text.red().to_string()
    } else {
        text
    }
}

fn stat_rows(stats: &AggregatedStats) -> Vec<(&'static str, String)> {
    vec![
        ("Games", stats.total_games.to_string()),
        ("Win rate", format!("{:.1}%", stats.win_rate)),
        (
            "K / D / A",
            format!("{:.1} / {:.1} / {:.1}", stats.avg_kills, stats.avg_deaths, stats.avg_assists),
        ),
        ("KDA", format!("{:.2}", stats.kda)),
        ("CS/min", format!("{:.1}", stats.cs_per_min)),
        ("Vision", format!("{:.1}", stats.avg_vision)),
        ("Damage share", format!("{:.1}%", stats.avg_damage_share)),
        ("Best win streak", stats.max_win_streak.to_string()),
        ("Worst loss streak", stats.max_loss_streak.to_string()),
        ("Champion diversity", format!("{:.2}", stats.champion_diversity)),
    ]
}

pub fn display_stats(stats: &AggregatedStats, rank: &str, player_name: &str) {
    header(&format!("📊 {} SEASON ({})", player_name, rank), 60);

    let win_rate = win_rate_cell(stats.win_rate);
    let rows: Vec<StatRow> = stat_rows(stats)
        .into_iter()
        .map(|(stat, value)| StatRow {
            stat: stat.to_string(),
            value: if stat == "Win rate" { win_rate.clone() } else { value },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if stats.top_champions.is_empty() {
        return;
    }

    println!("\n{}", "Top Champions".bold().yellow());
    let rows: Vec<ChampionRow> = stats
        .top_champions
        .iter()
        .enumerate()
        .map(|(idx, champ)| ChampionRow {
            rank: format!("#{}", idx + 1),
            champion: champ.name.clone(),
            games: champ.games.to_string(),
            win_rate: win_rate_cell(champ.win_rate),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_achievements(achievements: &[Achievement]) {
    if achievements.is_empty() {
        return;
    }

    header("🏅 BADGES", 60);
    for badge in achievements {
        println!("  {} {}", badge.name.bold().magenta(), badge.description);
    }
}

pub fn display_opponents(opponents: &[EncounteredPlayer]) {
    if opponents.is_empty() {
        return;
    }

    header("👀 FREQUENT OPPONENTS", 60);
    let rows: Vec<OpponentRow> = opponents
        .iter()
        .enumerate()
        .map(|(idx, player)| OpponentRow {
            rank: format!("#{}", idx + 1),
            player: player.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            role: player.role.clone().unwrap_or_else(|| "-".to_string()),
            games: player.encounters.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_postcards(postcards: &[Postcard]) {
    header("🔥 YOUR ROASTS", 60);

    for card in postcards {
        let title = match card.kind.as_str() {
            "intro" => card.title.bold().cyan(),
            "stat" | "comparison" => card.title.bold().yellow(),
            _ => card.title.bold().red(),
        };
        println!("{}", title);
        println!("  {}", card.content);
        if let Some(stat) = &card.stat {
            println!("  {}", stat.dimmed());
        }
        println!();
    }
}

fn rank_verdict(your_rank: &str, pro: &ProInfo) -> String {
    let (Some(you), Some(them)) = (RankTier::parse(your_rank), RankTier::parse(&pro.rank)) else {
        return format!("No rank to compare with {}.", pro.name);
    };
    let gap = them.tier_gap(&you);

    match compare_ranks(your_rank, &pro.rank) {
        Ordering::Less if gap > 0 => format!("{} is {} tier(s) above you", pro.name, gap),
        Ordering::Less => format!("{} is a few divisions above you", pro.name),
        Ordering::Equal => format!("Same rank as {}. Suspicious.", pro.name),
        Ordering::Greater => format!("You outrank {} right now. Screenshot it.", pro.name),
    }
}

pub fn display_comparison(your_rank: &str, you: &AggregatedStats, pro_info: &ProInfo, pro: &AggregatedStats) {
    header(
        &format!("⚔️  YOU VS {} ({}, {})", pro_info.name.to_uppercase(), pro_info.team, pro_info.role),
        60,
    );

    let mut rows = vec![ComparisonRow {
        stat: "Rank".to_string(),
        you: your_rank.to_string(),
        pro: pro_info.rank.clone(),
    }];
    rows.extend(
        stat_rows(you)
            .into_iter()
            .zip(stat_rows(pro))
            .map(|((stat, you), (_, pro))| ComparisonRow {
                stat: stat.to_string(),
                you,
                pro,
            }),
    );

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!("\n{} {}\n", "Verdict:".bold().yellow(), rank_verdict(your_rank, pro_info));
}

pub fn display_report(report: &AnalysisReport, player_name: &str) {
    display_stats(&report.your_stats, &report.your_rank, player_name);
    display_achievements(&report.achievements);
    display_opponents(&report.frequent_opponents);

    if let (Some(pro_info), Some(pro_stats)) = (&report.pro_info, &report.pro_stats) {
        display_comparison(&report.your_rank, &report.your_stats, pro_info, pro_stats);
    }

    display_postcards(&report.postcards);
}

pub fn display_roster(roster: &BTreeMap<&'static str, BTreeMap<&'static str, Vec<&'static ProRosterEntry>>>) {
    for (league, teams) in roster {
        if teams.is_empty() {
            continue;
        }
        header(&format!("🏆 {}", league), 60);

        let rows: Vec<RosterRow> = teams
            .iter()
            .flat_map(|(team, players)| {
                players.iter().map(move |p| RosterRow {
                    team: team.to_string(),
                    player: p.name.to_string(),
                    role: p.role.to_string(),
                    id: p.id.to_string(),
                })
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pro(rank: &str) -> ProInfo {
        ProInfo {
            name: "Faker".to_string(),
            team: "T1".to_string(),
            role: "Mid".to_string(),
            rank: rank.to_string(),
        }
    }

    #[test]
    fn verdict_counts_tiers() {
        assert_eq!(
            rank_verdict("GOLD II", &pro("CHALLENGER I")),
            "Faker is 6 tier(s) above you"
        );
        assert_eq!(
            rank_verdict("GOLD II", &pro("GOLD I")),
            "Faker is a few divisions above you"
        );
        assert!(rank_verdict("DIAMOND I", &pro("EMERALD IV")).starts_with("You outrank"));
        assert_eq!(rank_verdict("GOLD II", &pro("GOLD II")), "Same rank as Faker. Suspicious.");
        assert_eq!(rank_verdict("GOLD II", &pro("Unknown")), "No rank to compare with Faker.");
    }

    #[test]
    fn stat_rows_line_up_for_comparison() {
        let rows = stat_rows(&AggregatedStats {
            kda: 2.5,
            champion_diversity: 0.25,
            ..AggregatedStats::default()
        });
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().any(|(s, v)| *s == "KDA" && v == "2.50"));
        assert!(rows.iter().any(|(s, v)| *s == "Champion diversity" && v == "0.25"));
    }
}
