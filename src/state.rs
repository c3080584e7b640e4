use std::collections::VecDeque;

use crate::aggregate::Probabilities;
use crate::league::{LEAGUES, League};
use crate::model::{TeamDetail, TeamSummary};
use crate::view::ViewState;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: ViewState,
    /// Bumped on every league entry and exit; deltas from older fetches are dropped.
    pub generation: u64,
    pub teams: Vec<TeamDetail>,
    pub leaderboard: Vec<TeamSummary>,
    pub home_selected: usize,
    pub team_selected: usize,
    pub leaderboard_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: ViewState::Home,
            generation: 0,
            teams: Vec::with_capacity(20),
            leaderboard: Vec::with_capacity(20),
            home_selected: 0,
            team_selected: 0,
            leaderboard_scroll: 0,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    /// Switches to the league page and returns the fetch it needs.
    pub fn enter_league(&mut self, league: League) -> ProviderCommand {
        let view = std::mem::take(&mut self.view);
        self.view = view.select_league(league);
        self.generation = self.generation.wrapping_add(1);
        self.teams.clear();
        self.leaderboard.clear();
        self.team_selected = 0;
        self.leaderboard_scroll = 0;
        ProviderCommand::FetchLeague {
            generation: self.generation,
            league,
        }
    }

    pub fn open_selected_league(&mut self) -> Option<ProviderCommand> {
        if !self.view.is_home() {
            return None;
        }
        let league = LEAGUES.get(self.home_selected).copied()?;
        Some(self.enter_league(league))
    }

    /// Opens the highlighted team. Needs no fetch: the team list already
    /// carries every team's detail.
    pub fn open_selected_team(&mut self) -> bool {
        if !matches!(self.view, ViewState::League { .. }) {
            return false;
        }
        let Some(team) = self.teams.get(self.team_selected).cloned() else {
            return false;
        };
        let view = std::mem::take(&mut self.view);
        self.view = view.select_team(team);
        true
    }

    pub fn back(&mut self) {
        let leaving_league = matches!(self.view, ViewState::League { .. });
        let view = std::mem::take(&mut self.view);
        self.view = view.back();
        if leaving_league {
            self.generation = self.generation.wrapping_add(1);
            self.teams.clear();
            self.leaderboard.clear();
            self.team_selected = 0;
            self.leaderboard_scroll = 0;
        }
    }

    pub fn selected_league(&self) -> Option<League> {
        self.view.league()
    }

    pub fn selected_team(&self) -> Option<&TeamDetail> {
        self.view.team()
    }

    pub fn team_probabilities(&self) -> Option<Probabilities> {
        self.selected_team().map(TeamDetail::probabilities)
    }

    pub fn select_next(&mut self) {
        match self.view {
            ViewState::Home => {
                if self.home_selected + 1 < LEAGUES.len() {
                    self.home_selected += 1;
                }
            }
            ViewState::League { .. } => {
                if self.team_selected + 1 < self.teams.len() {
                    self.team_selected += 1;
                }
            }
            ViewState::Team { .. } => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.view {
            ViewState::Home => self.home_selected = self.home_selected.saturating_sub(1),
            ViewState::League { .. } => self.team_selected = self.team_selected.saturating_sub(1),
            ViewState::Team { .. } => {}
        }
    }

    pub fn clamp_selection(&mut self) {
        self.home_selected = self.home_selected.min(LEAGUES.len() - 1);
        if self.teams.is_empty() {
            self.team_selected = 0;
        } else if self.team_selected >= self.teams.len() {
            self.team_selected = self.teams.len() - 1;
        }
        let max_scroll = self.leaderboard.len().saturating_sub(1) as u16;
        self.leaderboard_scroll = self.leaderboard_scroll.min(max_scroll);
    }

    pub fn scroll_leaderboard_down(&mut self, rows: u16) {
        self.leaderboard_scroll = self.leaderboard_scroll.saturating_add(rows);
        self.clamp_selection();
    }

    pub fn scroll_leaderboard_up(&mut self, rows: u16) {
        self.leaderboard_scroll = self.leaderboard_scroll.saturating_sub(rows);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn is_current(&self, generation: u64, league: League) -> bool {
        self.generation == generation && self.view.league() == Some(league)
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetTeams {
        generation: u64,
        league: League,
        teams: Vec<TeamDetail>,
    },
    SetLeaderboard {
        generation: u64,
        league: League,
        rows: Vec<TeamSummary>,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchLeague { generation: u64, league: League },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetTeams {
            generation,
            league,
            teams,
        } => {
            if !state.is_current(generation, league) {
                state.push_log(format!("[INFO] Ignored stale team data for {}", league.name));
                return;
            }
            state.teams = teams;
            state.clamp_selection();
        }
        Delta::SetLeaderboard {
            generation,
            league,
            rows,
        } => {
            if !state.is_current(generation, league) {
                state.push_log(format!("[INFO] Ignored stale leaderboard for {}", league.name));
                return;
            }
            state.leaderboard = rows;
            state.clamp_selection();
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
