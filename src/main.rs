use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table};

use league_stats_terminal::config::Config;
use league_stats_terminal::data_source;
use league_stats_terminal::dates::format_match_date;
use league_stats_terminal::league::LEAGUES;
use league_stats_terminal::model::{Match, TeamDetail};
use league_stats_terminal::provider::spawn_provider;
use league_stats_terminal::state::{AppState, Delta, ProviderCommand, apply_delta};
use league_stats_terminal::view::ViewState;

const HOME_TITLE: &str = "340 - Football Stats & Predictions";
const LEADERBOARD_PAGE: u16 = 10;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::PageDown => self.state.scroll_leaderboard_down(LEADERBOARD_PAGE),
            KeyCode::PageUp => self.state.scroll_leaderboard_up(LEADERBOARD_PAGE),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => self.open_selected(),
            KeyCode::Char('b') | KeyCode::Char('h') | KeyCode::Esc | KeyCode::Left => {
                self.state.back()
            }
            _ => {}
        }
    }

    fn open_selected(&mut self) {
        match self.state.view {
            ViewState::Home => {
                if let Some(cmd) = self.state.open_selected_league() {
                    self.request(cmd);
                }
            }
            ViewState::League { .. } => {
                if !self.state.open_selected_team() {
                    self.state.push_log("[INFO] Team list not loaded yet");
                }
            }
            ViewState::Team { .. } => {}
        }
    }

    fn request(&mut self, cmd: ProviderCommand) {
        let ProviderCommand::FetchLeague { league, .. } = &cmd;
        let name = league.name;
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Data fetch unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] League request failed");
        } else {
            self.state.push_log(format!("[INFO] Loading {name}"));
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let source = data_source::from_root(&config.data_root, config.http_timeout);
    spawn_provider(source, tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx, config.tick);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.state.view {
        ViewState::Home => render_home(frame, chunks[1], &app.state),
        ViewState::League { .. } => render_league(frame, chunks[1], &app.state),
        ViewState::Team { team, .. } => render_team(frame, chunks[1], team),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state.view))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let (title, subtitle) = match &state.view {
        ViewState::Home => (HOME_TITLE.to_string(), String::new()),
        ViewState::League { league } => (league.name.to_string(), league.logo_path()),
        ViewState::Team { league, team } => (
            format!("{} | {}", team.player_name, league.name),
            team.logo_path(),
        ),
    };
    let line1 = format!("  .-.  {title}");
    let line2 = format!(" (   ) {subtitle}");
    let line3 = "  `-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(view: &ViewState) -> &'static str {
    match view {
        ViewState::Home => "j/k/↑/↓ Move | Enter Open league | ? Help | q Quit",
        ViewState::League { .. } => {
            "j/k/↑/↓ Team | Enter Open team | PgUp/PgDn Leaderboard | b/Esc Home | ? Help | q Quit"
        }
        ViewState::Team { .. } => "b/Esc Back to league | ? Help | q Quit",
    }
}

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = LEAGUES
        .iter()
        .enumerate()
        .map(|(idx, league)| {
            let selected = idx == state.home_selected;
            let prefix = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{prefix}{:<18}", league.name), style),
                Span::styled(
                    format!("  {}", league.logo_path()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect::<Vec<_>>();

    let list = Paragraph::new(lines)
        .block(Block::default().title("Leagues").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_league(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(58), Constraint::Length(58)])
        .split(area);

    render_leaderboard(frame, columns[0], state);
    render_team_selector(frame, columns[1], state);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Leaderboard").borders(Borders::ALL);
    if state.leaderboard.is_empty() {
        let loading = Paragraph::new("Loading leaderboard...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let rows = state
        .leaderboard
        .iter()
        .enumerate()
        .skip(state.leaderboard_scroll as usize)
        .map(|(idx, team)| Row::new(team.leaderboard_cells(idx + 1).map(Cell::from)))
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(18),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
    ];
    let header = Row::new(vec![
        "Position", "Team", "Pts", "MP", "W", "D", "L", "GS", "GC", "GD",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_team_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Select team to view data")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.teams.is_empty() {
        let loading =
            Paragraph::new("Loading teams...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let (start, end) = visible_range(state.team_selected, state.teams.len(), inner.height as usize);
    let lines = (start..end)
        .map(|idx| {
            let team = &state.teams[idx];
            let selected = idx == state.team_selected;
            let prefix = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{prefix}{:<22}", team.player_name), style),
                Span::styled(
                    format!("  {}", team.logo_path()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_team(frame: &mut Frame, area: Rect, team: &TeamDetail) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Min(3),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(5),
        ])
        .split(columns[1]);

    render_standing(frame, left[0], team);
    render_matches(frame, left[1], "Last 5 matches", &team.last5, MatchTable::Played);
    render_matches(frame, left[2], "Next 5 matches", &team.next5, MatchTable::Upcoming);

    let probs = team.probabilities();
    let projection = Paragraph::new(format!(
        "Team rating: {}\nExpected position (projection over {} simulations)",
        team.rating, probs.total
    ))
    .block(Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::TOP));
    frame.render_widget(projection, right[0]);

    let prob_row = Row::new(vec![
        format!("{}%", probs.win),
        format!("{}%", probs.top4),
        format!("{}%", probs.top8),
        format!("{}%", probs.relegation),
    ]);
    let prob_header = Row::new(vec!["Victory %", "Top 4 %", "Top 8 %", "Relegation %"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let prob_table = Table::new(vec![prob_row], [Constraint::Ratio(1, 4); 4])
        .header(prob_header)
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM));
    frame.render_widget(prob_table, right[1]);

    render_position_chart(frame, right[2], team);
}

fn render_standing(frame: &mut Frame, area: Rect, team: &TeamDetail) {
    let header = Row::new(vec!["Pos", "Pts", "MP", "W", "D", "L", "GS", "GC"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let row = Row::new(vec![
        format!("{}.", team.current),
        team.points.to_string(),
        team.matches.to_string(),
        team.win.to_string(),
        team.draw.to_string(),
        team.lost.to_string(),
        team.goals_for.to_string(),
        team.goals_against.to_string(),
    ]);
    let table = Table::new(vec![row], [Constraint::Length(5); 8])
        .header(header)
        .block(Block::default().title("Current standing").borders(Borders::ALL));
    frame.render_widget(table, area);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MatchTable {
    Played,
    Upcoming,
}

fn render_matches(frame: &mut Frame, area: Rect, title: &str, matches: &[Match], kind: MatchTable) {
    let block = Block::default().title(title).borders(Borders::ALL);
    if matches.is_empty() {
        let empty = Paragraph::new("Data not available.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let (date_header, score_header) = match kind {
        MatchTable::Played => ("Date", "Score"),
        MatchTable::Upcoming => ("", "Odds%"),
    };
    let header = Row::new(vec![date_header, "Team A", score_header, "Team B"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = matches
        .iter()
        .map(|m| {
            let score = match kind {
                MatchTable::Played => m.full_time_label(),
                MatchTable::Upcoming => m.odds_label(),
            };
            Row::new(vec![
                format_match_date(&m.date),
                m.team1.clone(),
                score,
                m.team2.clone(),
            ])
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(21),
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Min(12),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_position_chart(frame: &mut Frame, area: Rect, team: &TeamDetail) {
    let block = Block::default().title("Position %").borders(Borders::ALL);
    let shares = team.position_shares();
    if shares.is_empty() {
        let empty = Paragraph::new("No simulations")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner_width = block.inner(area).width as usize;
    let count = shares.len();
    let bar_width =
        (inner_width.saturating_sub(count.saturating_sub(1)) / count).clamp(1, 6) as u16;

    let bars = shares
        .iter()
        .map(|share| {
            let text = if bar_width >= 5 {
                format!("{:.0}", share.share.as_f64())
            } else {
                String::new()
            };
            Bar::default()
                .value(u64::from(share.share.hundredths()))
                .label(Line::from(share.label.clone()))
                .text_value(text)
                .style(Style::default().fg(Color::Red))
        })
        .collect::<Vec<_>>();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(10_000);
    frame.render_widget(chart, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "League Stats - Help",
        "",
        "Global:",
        "  j/k or ↑/↓       Move selection",
        "  Enter / l / →    Open league or team",
        "  b / Esc / h / ←  Back",
        "  ?                Toggle help",
        "  q                Quit",
        "",
        "League:",
        "  PgUp / PgDn      Scroll leaderboard",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
