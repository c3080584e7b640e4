use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use anyhow::Result;

use crate::data_source::DataSource;
use crate::league::League;
use crate::model::{TeamDetail, TeamSummary, parse_leaderboard_json, parse_teams_json};
use crate::state::{Delta, ProviderCommand};

/// Runs fetches on a worker thread until either channel closes.
pub fn spawn_provider(
    source: Box<dyn DataSource>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Reading data from {}",
            source.describe()
        )));
        while let Ok(cmd) = cmd_rx.recv() {
            let cmd = latest_command(cmd, &cmd_rx);
            if !handle_command(source.as_ref(), cmd, &tx) {
                return;
            }
        }
    })
}

/// Skips league fetches that were superseded while the worker was busy.
pub fn latest_command(
    first: ProviderCommand,
    cmd_rx: &Receiver<ProviderCommand>,
) -> ProviderCommand {
    let mut latest = first;
    while let Ok(next) = cmd_rx.try_recv() {
        latest = next;
    }
    latest
}

/// Executes one command, sending results as they arrive. Returns `false`
/// once the UI side has hung up.
pub fn handle_command(source: &dyn DataSource, cmd: ProviderCommand, tx: &Sender<Delta>) -> bool {
    match cmd {
        ProviderCommand::FetchLeague { generation, league } => {
            let teams = match fetch_teams(source, league) {
                Ok(teams) => Delta::SetTeams {
                    generation,
                    league,
                    teams,
                },
                Err(err) => Delta::Log(format!(
                    "[WARN] Error fetching league data for {}: {err:#}",
                    league.name
                )),
            };
            if tx.send(teams).is_err() {
                return false;
            }

            let leaderboard = match fetch_leaderboard(source, league) {
                Ok(rows) => Delta::SetLeaderboard {
                    generation,
                    league,
                    rows,
                },
                Err(err) => Delta::Log(format!(
                    "[WARN] Error fetching leaderboard for {}: {err:#}",
                    league.name
                )),
            };
            tx.send(leaderboard).is_ok()
        }
    }
}

pub fn fetch_teams(source: &dyn DataSource, league: League) -> Result<Vec<TeamDetail>> {
    let raw = source.fetch_text(&league.teams_path())?;
    parse_teams_json(&raw)
}

pub fn fetch_leaderboard(source: &dyn DataSource, league: League) -> Result<Vec<TeamSummary>> {
    let raw = source.fetch_text(&league.leaderboard_path())?;
    parse_leaderboard_json(&raw)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::league::LEAGUES;

    #[test]
    fn queued_league_fetches_collapse_to_newest() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        for (idx, league) in LEAGUES.iter().enumerate().skip(1) {
            cmd_tx
                .send(ProviderCommand::FetchLeague {
                    generation: idx as u64 + 1,
                    league: *league,
                })
                .unwrap();
        }
        let first = ProviderCommand::FetchLeague {
            generation: 1,
            league: LEAGUES[0],
        };

        let cmd = latest_command(first, &cmd_rx);
        assert_eq!(
            cmd,
            ProviderCommand::FetchLeague {
                generation: 5,
                league: LEAGUES[4],
            }
        );
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn lone_command_is_kept() {
        let (_cmd_tx, cmd_rx) = mpsc::channel();
        let first = ProviderCommand::FetchLeague {
            generation: 7,
            league: LEAGUES[2],
        };
        assert_eq!(latest_command(first.clone(), &cmd_rx), first);
    }
}
