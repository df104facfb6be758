use super::{ComparisonInput, Postcard, YearReview, YearReviewInput};

pub fn year_review(input: &YearReviewInput<'_>) -> YearReview {
    let stats = input.stats;
    let (champ, games, win_rate) = stats
        .top_champions
        .first()
        .map(|c| (c.name.as_str(), c.games, c.win_rate))
        .unwrap_or(("Unknown", 0, 0.0));

    let postcards = vec![
        Postcard::new(
            format!("{} RECAP", input.season),
            "Let's talk about your year.",
            "intro",
        ),
        Postcard::new(
            "THE NUMBERS",
            format!(
                "{} games. {:.1}% winrate. {}.",
                stats.total_games, stats.win_rate, input.rank
            ),
            "stat",
        )
        .with_stat(input.rank),
        Postcard::new(
            format!("{} MAIN", champ.to_uppercase()),
            format!(
                "{} games on {}. {:.1}% winrate. They said you couldn't do it. They were right.",
                games, champ, win_rate
            ),
            "roast",
        ),
    ];

    YearReview {
        postcards,
        topics: Vec::new(),
    }
}

pub fn comparison(input: &ComparisonInput<'_>) -> Vec<Postcard> {
    let you = input.your_stats;
    let pro = input.pro_stats;

    vec![
        Postcard::new(
            format!("YOU VS {}", input.pro_name.to_uppercase()),
            format!(
                "{} from {} is {}. You are {}. Let's see how this goes.",
                input.pro_name, input.pro_team, input.pro_rank, input.your_rank
            ),
            "intro",
        ),
        Postcard::new(
            "WIN RATE",
            format!(
                "{:.1}% for you, {:.1}% for {}.",
                you.win_rate, pro.win_rate, input.pro_name
            ),
            "stat",
        )
        .with_stat(format!("{:.1}% vs {:.1}%", you.win_rate, pro.win_rate)),
        Postcard::new(
            "KDA CHECK",
            format!(
                "Your KDA is {:.2}. {} sits at {:.2}. Same game, different sport.",
                you.kda, input.pro_name, pro.kda
            ),
            "roast",
        ),
    ]
}
