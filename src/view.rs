use crate::league::League;
use crate::model::TeamDetail;

/// Which screen is showing and what is selected on it.
///
/// A team can only be selected inside a league, so the enum shape alone
/// rules out "team without league". Transitions consume the old value and
/// return the next one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Home,
    League {
        league: League,
    },
    Team {
        league: League,
        team: Box<TeamDetail>,
    },
}

impl ViewState {
    pub fn select_league(self, league: League) -> Self {
        ViewState::League { league }
    }

    /// Opens a team page. Ignored when no league is selected.
    pub fn select_team(self, team: TeamDetail) -> Self {
        match self {
            ViewState::Home => ViewState::Home,
            ViewState::League { league } | ViewState::Team { league, .. } => ViewState::Team {
                league,
                team: Box::new(team),
            },
        }
    }

    /// Team page goes back to its league, league page goes home.
    pub fn back(self) -> Self {
        match self {
            ViewState::Home | ViewState::League { .. } => ViewState::Home,
            ViewState::Team { league, .. } => ViewState::League { league },
        }
    }

    pub fn league(&self) -> Option<League> {
        match self {
            ViewState::Home => None,
            ViewState::League { league } | ViewState::Team { league, .. } => Some(*league),
        }
    }

    pub fn team(&self) -> Option<&TeamDetail> {
        match self {
            ViewState::Team { team, .. } => Some(team.as_ref()),
            _ => None,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, ViewState::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::LEAGUES;

    fn team(name: &str) -> TeamDetail {
        TeamDetail {
            player_name: name.to_string(),
            current: 1,
            rating: 1500.0,
            points: 0,
            matches: 0,
            win: 0,
            draw: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            positions: vec![0; 20],
            last5: Vec::new(),
            next5: Vec::new(),
        }
    }

    #[test]
    fn select_team_from_home_is_ignored() {
        assert_eq!(ViewState::Home.select_team(team("Lyon")), ViewState::Home);
    }

    #[test]
    fn team_page_remembers_its_league() {
        let view = ViewState::Home
            .select_league(LEAGUES[4])
            .select_team(team("Lyon"));
        assert_eq!(view.league(), Some(LEAGUES[4]));
        assert_eq!(view.team().map(|t| t.player_name.as_str()), Some("Lyon"));

        let view = view.back();
        assert_eq!(view, ViewState::League { league: LEAGUES[4] });
    }

    #[test]
    fn switching_league_clears_team() {
        let view = ViewState::Home
            .select_league(LEAGUES[0])
            .select_team(team("Inter"))
            .select_league(LEAGUES[3]);
        assert_eq!(view.league(), Some(LEAGUES[3]));
        assert!(view.team().is_none());
    }
}
