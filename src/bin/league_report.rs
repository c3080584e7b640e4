use anyhow::{Context, Result};

use league_stats_terminal::config::Config;
use league_stats_terminal::data_source;
use league_stats_terminal::league::{LEAGUES, League};
use league_stats_terminal::provider::{fetch_leaderboard, fetch_teams};

fn main() -> Result<()> {
    let mut config = Config::from_env();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if let Some(root) = arg_value(&args, "--root") {
        config.data_root = root;
    }
    let league_name = arg_value(&args, "--league").unwrap_or_else(|| LEAGUES[0].name.to_string());
    let league = League::find(&league_name).with_context(|| {
        let known = LEAGUES.iter().map(|l| l.name).collect::<Vec<_>>().join(", ");
        format!("unknown league {league_name:?} (known: {known})")
    })?;

    let source = data_source::from_root(&config.data_root, config.http_timeout);
    println!("{} ({})", league.name, source.describe());

    let leaderboard = fetch_leaderboard(source.as_ref(), league)
        .with_context(|| format!("loading {}", league.leaderboard_path()))?;
    println!();
    println!(
        "{:>3}  {:<24} {:>4} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}",
        "Pos", "Team", "Pts", "MP", "W", "D", "L", "GS", "GC", "GD"
    );
    for (idx, row) in leaderboard.iter().enumerate() {
        println!(
            "{:>3}  {:<24} {:>4} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}",
            idx + 1,
            row.player,
            row.points,
            row.matches,
            row.win,
            row.draw,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_difference()
        );
    }

    let teams = fetch_teams(source.as_ref(), league)
        .with_context(|| format!("loading {}", league.teams_path()))?;
    println!();
    println!(
        "{:<24} {:>7} {:>9} {:>8} {:>8} {:>8} {:>11}",
        "Team", "Rating", "Sims", "Win%", "Top4%", "Top8%", "Releg%"
    );
    for team in &teams {
        let probs = team.probabilities();
        println!(
            "{:<24} {:>7} {:>9} {:>8} {:>8} {:>8} {:>11}",
            team.player_name,
            team.rating,
            probs.total,
            probs.win.to_string(),
            probs.top4.to_string(),
            probs.top8.to_string(),
            probs.relegation.to_string()
        );
    }

    Ok(())
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
