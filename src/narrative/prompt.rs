// Prompt templates for the year review and pro comparison cards.
//
// Numbers are rendered exactly as the aggregator rounded them so the model
// quotes them instead of doing arithmetic.

use super::{ComparisonInput, YearReviewInput};
use crate::analysis::{AggregatedStats, TopChampion};
use std::fmt::Write;

/// Samples this large probably hit the match-history cap.
const CAPPED_SAMPLE: u32 = 99;

fn champion_line(champion: Option<&TopChampion>) -> String {
    match champion {
        Some(c) => format!("{} ({} games, {:.1}% WR)", c.name, c.games, c.win_rate),
        None => "none".to_string(),
    }
}

fn stat_block(stats: &AggregatedStats, rank: &str) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "- Rank: {}", rank);
    let _ = writeln!(block, "- Games analyzed: {}", stats.total_games);
    let _ = writeln!(block, "- Overall winrate: {:.1}%", stats.win_rate);
    let _ = writeln!(block, "- Most played: {}", champion_line(stats.top_champions.first()));
    let _ = writeln!(block, "- Second most: {}", champion_line(stats.top_champions.get(1)));
    let _ = writeln!(
        block,
        "- KDA: {:.2} ({:.1} / {:.1} / {:.1})",
        stats.kda, stats.avg_kills, stats.avg_deaths, stats.avg_assists
    );
    let _ = writeln!(block, "- CS per minute: {:.1}", stats.cs_per_min);
    let _ = writeln!(block, "- Vision score per game: {:.1}", stats.avg_vision);
    let _ = writeln!(block, "- Team damage share: {:.1}%", stats.avg_damage_share);
    let _ = writeln!(block, "- Worst loss streak: {} games", stats.max_loss_streak);
    let _ = writeln!(block, "- Best win streak: {} games", stats.max_win_streak);
    block
}

pub fn year_review_prompt(input: &YearReviewInput<'_>) -> String {
    let stats = input.stats;
    let mut prompt = format!(
        "Write 5-7 short, funny roasts about this player's {season} ranked season. \
         Aim for dry wit with the odd groan-worthy pun. The current season is {season}; \
         refer to the stats as being from {season}.\n",
        season = input.season
    );

    if !input.used_topics.is_empty() {
        let _ = write!(
            prompt,
            "\nThese topics were already roasted, pick different stats:\n{}\n",
            input.used_topics.join(", ")
        );
    }

    if stats.total_games >= CAPPED_SAMPLE {
        let _ = write!(
            prompt,
            "\nOnly their most recent {} games were fetched, so they played more than that. \
             Do not joke about how few games they played.\n",
            stats.total_games
        );
    }

    prompt.push_str(
        "\nTone examples:\n\
         - \"38% winrate on Riven after 60 games. Loyalty is a virtue. So is switching champions.\"\n\
         - \"Nine losses in a row and you still hit queue. Persistence, or a cry for help.\"\n\
         - \"7 deaths a game. The enemy jungler sends you a thank-you card every Friday.\"\n",
    );

    let _ = write!(prompt, "\nTHEIR STATS:\n{}", stat_block(stats, input.rank));

    if !input.achievements.is_empty() {
        prompt.push_str("\nBadges they earned:\n");
        for badge in input.achievements {
            let _ = writeln!(prompt, "- {}: {}", badge.name, badge.description);
        }
    }

    prompt.push_str(
        "\nUse their real numbers. Keep each roast to one or two sentences and never explain the joke.\n\
         \nReturn ONLY a JSON object of the form\n\
         {\"postcards\": [{\"title\": \"SHORT TITLE\", \"content\": \"the roast\", \"type\": \"roast\"}], \
         \"topics\": [\"main_champion_winrate\", \"loss_streak\"]}\n\
         where topics lists what each roast was about.",
    );

    prompt
}

pub fn comparison_prompt(input: &ComparisonInput<'_>) -> String {
    let mut prompt = format!(
        "Write 5-7 short, funny postcards comparing an ordinary ranked player with {pro} \
         ({team}) over the {season} season. Roast the player, not the pro.\n",
        pro = input.pro_name,
        team = input.pro_team,
        season = input.season
    );

    let _ = write!(
        prompt,
        "\nTHE PLAYER:\n{}\n{} ({}):\n{}",
        stat_block(input.your_stats, input.your_rank),
        input.pro_name.to_uppercase(),
        input.pro_team,
        stat_block(input.pro_stats, input.pro_rank)
    );

    prompt.push_str(
        "\nContrast the real numbers side by side. One or two sentences per card.\n\
         \nReturn ONLY a JSON array of the form\n\
         [{\"title\": \"SHORT TITLE\", \"content\": \"the comparison\", \"type\": \"comparison\"}]",
    );

    prompt
}
