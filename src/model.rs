use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{self, PositionShare, Probabilities};
use crate::slug::team_logo_path;

/// One leaderboard row. Rows arrive already ordered by rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub player: String,
    pub points: i32,
    pub matches: u32,
    pub win: u32,
    pub draw: u32,
    pub lost: u32,
    #[serde(rename = "GF")]
    pub goals_for: u32,
    #[serde(rename = "GA")]
    pub goals_against: u32,
}

impl TeamSummary {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Position, Team, Pts, MP, W, D, L, GS, GC, GD for a 1-based `rank`.
    pub fn leaderboard_cells(&self, rank: usize) -> [String; 10] {
        [
            rank.to_string(),
            self.player.clone(),
            self.points.to_string(),
            self.matches.to_string(),
            self.win.to_string(),
            self.draw.to_string(),
            self.lost.to_string(),
            self.goals_for.to_string(),
            self.goals_against.to_string(),
            self.goal_difference().to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDetail {
    #[serde(rename = "playerName")]
    pub player_name: String,
    pub current: u32,
    pub rating: f64,
    pub points: i32,
    pub matches: u32,
    pub win: u32,
    pub draw: u32,
    pub lost: u32,
    #[serde(rename = "GF")]
    pub goals_for: u32,
    #[serde(rename = "GA")]
    pub goals_against: u32,
    /// Simulation counts per final rank; index 0 is first place.
    #[serde(default)]
    pub positions: Vec<u64>,
    #[serde(default)]
    pub last5: Vec<Match>,
    #[serde(default)]
    pub next5: Vec<Match>,
}

impl TeamDetail {
    pub fn logo_path(&self) -> String {
        team_logo_path(&self.player_name)
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn probabilities(&self) -> Probabilities {
        aggregate::aggregate(&self.positions)
    }

    pub fn position_shares(&self) -> Vec<PositionShare> {
        aggregate::position_shares(&self.positions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub team1: String,
    #[serde(default)]
    pub team2: String,
    #[serde(default)]
    pub score: Score,
}

/// Score values are kept as raw JSON so whatever the generator wrote (ints
/// for played matches, anything for fixtures) is displayed untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "ft", default)]
    pub full_time: Vec<Value>,
}

impl Score {
    fn side(&self, idx: usize) -> String {
        match self.full_time.get(idx) {
            // Floats go through f64 Display so `50.0` prints as `50`.
            Some(Value::Number(n)) if n.is_f64() => {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl Match {
    /// `"2-1"` for a played match.
    pub fn full_time_label(&self) -> String {
        format!("{}-{}", self.score.side(0), self.score.side(1))
    }

    /// Upcoming fixtures show the same pair joined with `/` under "Odds%".
    pub fn odds_label(&self) -> String {
        format!("{}/{}", self.score.side(0), self.score.side(1))
    }
}

pub fn parse_leaderboard_json(raw: &str) -> Result<Vec<TeamSummary>> {
    serde_json::from_str(raw.trim()).context("invalid leaderboard json")
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<TeamDetail>> {
    serde_json::from_str(raw.trim()).context("invalid team data json")
}
