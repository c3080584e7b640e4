use crate::slug::slugify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct League {
    pub name: &'static str,
}

pub const LEAGUES: [League; 5] = [
    League { name: "Serie A" },
    League {
        name: "Premier League",
    },
    League { name: "La Liga" },
    League { name: "Bundesliga" },
    League { name: "Ligue 1" },
];

impl League {
    pub fn slug(&self) -> String {
        slugify(self.name)
    }

    pub fn logo_path(&self) -> String {
        format!("./images/{}-logo.png", self.slug())
    }

    /// Team detail documents (one entry per team, with simulation counts).
    pub fn teams_path(&self) -> String {
        format!("./data/{}-data.json", self.slug())
    }

    /// Leaderboard rows, already ordered by rank.
    pub fn leaderboard_path(&self) -> String {
        format!("./data/{}-leaderboard.json", self.slug())
    }

    /// Looks a league up by display name or slug, ignoring case and spacing.
    pub fn find(name: &str) -> Option<League> {
        let wanted = slugify(name);
        if wanted.is_empty() {
            return None;
        }
        LEAGUES.iter().copied().find(|league| league.slug() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_paths_follow_slug() {
        let serie_a = LEAGUES[0];
        assert_eq!(serie_a.logo_path(), "./images/serie-a-logo.png");
        assert_eq!(serie_a.teams_path(), "./data/serie-a-data.json");
        assert_eq!(
            serie_a.leaderboard_path(),
            "./data/serie-a-leaderboard.json"
        );
    }

    #[test]
    fn find_accepts_name_or_slug() {
        assert_eq!(League::find("premier league").map(|l| l.name), Some("Premier League"));
        assert_eq!(League::find("ligue-1").map(|l| l.name), Some("Ligue 1"));
        assert_eq!(League::find("  La   Liga ").map(|l| l.name), Some("La Liga"));
        assert!(League::find("Eredivisie").is_none());
        assert!(League::find("   ").is_none());
    }
}
