//! Ratatui-based terminal UI.
//!
//! The TUI shows one applicant at a time; the user predicts repayment with a
//! key press, and every scored guess lands on a scatter chart (income vs
//! credit score) next to the running confusion matrix and money totals.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::{self, LoadedLevel};
use crate::cli::PlayArgs;
use crate::data::LevelSource;
use crate::domain::{Guess, GuessReport, Level};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::ApplicantScatterChart;

/// Start the TUI.
pub fn run(args: PlayArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    args: PlayArgs,
    source: LevelSource,
    loaded: Option<LoadedLevel>,
    /// Every scored guess of the current session, for the chart and exports.
    history: Vec<GuessReport>,
    last: Option<GuessReport>,
    status: String,
}

impl App {
    fn new(args: PlayArgs) -> Result<Self, AppError> {
        let source = LevelSource::resolve(args.data.as_deref());
        let loaded = pipeline::load_level(&source, &args)?;
        let status = format!(
            "Loaded {} ({} playable records).",
            loaded.level.display_name(),
            loaded.session.stream().len()
        );

        Ok(Self {
            args,
            source,
            loaded: Some(loaded),
            history: Vec::new(),
            last: None,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('y') | KeyCode::Char('1') => self.apply_guess(Guess::Approve),
            KeyCode::Char('n') | KeyCode::Char('0') => self.apply_guess(Guess::Deny),
            KeyCode::Right => self.change_level(self.args.level.next()),
            KeyCode::Left => self.change_level(self.args.level.prev()),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    fn apply_guess(&mut self, guess: Guess) {
        let Some(loaded) = &mut self.loaded else {
            self.status = "No dataset loaded.".to_string();
            return;
        };

        match loaded.session.guess(guess) {
            Ok(Some(report)) => {
                self.status = if report.correct {
                    "Correct!".to_string()
                } else {
                    "Incorrect!".to_string()
                };
                self.history.push(report);
                self.last = Some(report);
            }
            Ok(None) => {
                self.status = "No data: this level has no playable records.".to_string();
            }
            Err(e) => {
                self.status = format!("Bad record: {e}");
            }
        }
    }

    /// Switch level. A failed fetch/parse keeps the previous session intact;
    /// a successful one replaces it wholesale.
    fn change_level(&mut self, level: Level) {
        self.args.level = level;
        self.reload();
    }

    fn reload(&mut self) {
        match pipeline::load_level(&self.source, &self.args) {
            Ok(loaded) => {
                self.status = format!(
                    "Loaded {} ({} playable records).",
                    loaded.level.display_name(),
                    loaded.session.stream().len()
                );
                self.loaded = Some(loaded);
                self.history.clear();
                self.last = None;
            }
            Err(e) => {
                self.status = format!("Load failed: {e} Keeping previous session.");
            }
        }
    }

    fn export(&mut self) {
        let Some(loaded) = &self.loaded else {
            self.status = "Nothing to export.".to_string();
            return;
        };

        let stem = crate::io::export::default_export_stem();
        let csv_path = PathBuf::from(format!("{stem}.csv"));
        let json_path = PathBuf::from(format!("{stem}.json"));
        let session_file = crate::io::export::SessionFile::new(loaded.level, loaded.session.stats());

        let result = crate::io::export::write_results_csv(&csv_path, &self.history)
            .and_then(|()| crate::io::export::write_session_json(&json_path, &session_file));

        self.status = match result {
            Ok(()) => format!("Exported {} and {}.", csv_path.display(), json_path.display()),
            Err(e) => format!("Export failed: {e}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("loans", Style::default().fg(Color::Cyan)),
            Span::raw(" — loan repayment trainer"),
        ]));

        match &self.loaded {
            Some(loaded) => {
                let stats = loaded.session.stats();
                let accuracy = stats
                    .accuracy()
                    .map(|a| format!("{:.1}%", a * 100.0))
                    .unwrap_or_else(|| "-".to_string());
                lines.push(Line::from(Span::styled(
                    format!(
                        "level: {} | source: {} | records: {} (held out {}) | position: {} | guesses: {} | accuracy: {accuracy}",
                        loaded.level.display_name(),
                        loaded.source_desc,
                        loaded.session.stream().len(),
                        loaded.session.stream().holdout_len(),
                        loaded.session.position(),
                        stats.guesses(),
                    ),
                    Style::default().fg(Color::Gray),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "no dataset loaded",
                    Style::default().fg(Color::Yellow),
                )));
            }
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_side_panel(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Guessed applicants").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let playable = self
            .loaded
            .as_ref()
            .is_some_and(|l| !l.session.stream().is_empty());
        if !playable {
            let msg = Paragraph::new("No data.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        }

        if self.history.is_empty() {
            let msg = Paragraph::new("Make a guess: y/1 approve, n/0 deny.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        }

        let series = ChartSeries::from_history(&self.history);
        let widget = ApplicantScatterChart {
            repaid_correct: &series.repaid_correct,
            repaid_wrong: &series.repaid_wrong,
            defaulted_correct: &series.defaulted_correct,
            defaulted_wrong: &series.defaulted_wrong,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "income ($)",
            y_label: "credit score",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_side_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);

        self.draw_applicant(frame, chunks[0]);
        self.draw_stats(frame, chunks[1]);
    }

    fn draw_applicant(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        match self.loaded.as_ref().and_then(|l| l.session.current()) {
            Some(record) => {
                let income = record
                    .income()
                    .map(|v| crate::report::format_money(v.round() as i64))
                    .unwrap_or_else(|_| "?".to_string());
                let score = record
                    .credit_score()
                    .map(|v| format!("{}", v.round() as i64))
                    .unwrap_or_else(|_| "?".to_string());
                lines.push(Line::from(format!("Income: {income}")));
                lines.push(Line::from(format!("Credit score: {score}")));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "No applicant to show.",
                    Style::default().fg(Color::Yellow),
                )));
            }
        }

        if let Some(last) = &self.last {
            let (verdict, color) = if last.correct {
                ("Correct!", Color::Green)
            } else {
                ("Incorrect!", Color::Red)
            };
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                verdict,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "guessed {} | actually {}",
                    last.guess.display_name(),
                    if last.actual.repaid() { "repaid" } else { "defaulted" },
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Applicant").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_stats(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = match &self.loaded {
            Some(loaded) => crate::report::format_stats(&loaded.session.stats()),
            None => "No session.".to_string(),
        };
        let p = Paragraph::new(text).block(Block::default().title("Outcome").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "y/1 approve  n/0 deny  ←/→ level  r reload  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Scatter series split by the visual encoding: color follows the actual
/// outcome, marker follows correctness.
#[derive(Debug, Default)]
struct ChartSeries {
    repaid_correct: Vec<(f64, f64)>,
    repaid_wrong: Vec<(f64, f64)>,
    defaulted_correct: Vec<(f64, f64)>,
    defaulted_wrong: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl ChartSeries {
    fn from_history(history: &[GuessReport]) -> Self {
        let mut series = ChartSeries::default();

        for r in history {
            let point = (r.income, r.credit_score);
            match (r.actual.repaid(), r.correct) {
                (true, true) => series.repaid_correct.push(point),
                (true, false) => series.repaid_wrong.push(point),
                (false, true) => series.defaulted_correct.push(point),
                (false, false) => series.defaulted_wrong.push(point),
            }
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for r in history {
            x_min = x_min.min(r.income);
            x_max = x_max.max(r.income);
            y_min = y_min.min(r.credit_score);
            y_max = y_max.max(r.credit_score);
        }

        if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
            x_min = 0.0;
            x_max = 100_000.0;
        }
        if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
            y_min = 300.0;
            y_max = 850.0;
        }

        let x_pad = ((x_max - x_min).abs() * 0.05).max(1.0);
        let y_pad = ((y_max - y_min).abs() * 0.05).max(1.0);
        series.x_bounds = [x_min - x_pad, x_max + x_pad];
        series.y_bounds = [y_min - y_pad, y_max + y_pad];

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Outcome, OutcomeStatistics};

    fn report(income: f64, score: f64, actual: Outcome, correct: bool) -> GuessReport {
        GuessReport {
            income,
            credit_score: score,
            guess: Guess::Approve,
            actual,
            correct,
            stats: OutcomeStatistics::default(),
        }
    }

    #[test]
    fn series_split_follows_the_visual_encoding() {
        let history = vec![
            report(50_000.0, 700.0, Outcome::Repaid, true),
            report(20_000.0, 480.0, Outcome::Defaulted, false),
            report(35_000.0, 610.0, Outcome::Defaulted, true),
            report(80_000.0, 760.0, Outcome::Repaid, false),
        ];
        let series = ChartSeries::from_history(&history);
        assert_eq!(series.repaid_correct.len(), 1);
        assert_eq!(series.repaid_wrong.len(), 1);
        assert_eq!(series.defaulted_correct.len(), 1);
        assert_eq!(series.defaulted_wrong.len(), 1);
    }

    #[test]
    fn bounds_pad_around_the_data() {
        let history = vec![
            report(10_000.0, 500.0, Outcome::Repaid, true),
            report(90_000.0, 800.0, Outcome::Repaid, true),
        ];
        let series = ChartSeries::from_history(&history);
        assert!(series.x_bounds[0] < 10_000.0);
        assert!(series.x_bounds[1] > 90_000.0);
        assert!(series.y_bounds[0] < 500.0);
        assert!(series.y_bounds[1] > 800.0);
    }

    #[test]
    fn degenerate_history_falls_back_to_sane_bounds() {
        let history = vec![report(50_000.0, 650.0, Outcome::Repaid, true)];
        let series = ChartSeries::from_history(&history);
        assert!(series.x_bounds[0] < series.x_bounds[1]);
        assert!(series.y_bounds[0] < series.y_bounds[1]);
    }
}
