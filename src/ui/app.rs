use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::config::AppConfig;
use crate::game::{Command, EditReport, Game, RoundOutcome, ScanStep, SearchReport, Update};

use super::game_view::{self, format_digit_list, ViewState};

/// Presentation pacing knobs.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Delay between search replay steps, in milliseconds.
    pub search_step_ms: u64,
    /// How long a found match stays highlighted, in milliseconds.
    pub match_hold_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            search_step_ms: 500,
            match_hold_ms: 2000,
        }
    }
}

/// Which prompt is currently accepting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Idle,
    Insert,
    Delete,
    Search,
}

/// Feedback severity, mapped to a color by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Normal,
    Success,
    Error,
    Warning,
}

/// One-line status message shown under the slot row.
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    fn normal(message: impl Into<String>) -> Self {
        Feedback {
            kind: FeedbackKind::Normal,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Feedback {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Feedback {
            kind: FeedbackKind::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Feedback {
            kind: FeedbackKind::Warning,
            message: message.into(),
        }
    }
}

/// An in-progress replay of a precomputed search trace.
///
/// The engine answers a search instantly; this walks its steps at the
/// configured pace so the player can watch the needle slide across the slots.
struct SearchReplay {
    steps: Vec<ScanStep>,
    found: bool,
    pattern_label: String,
    position: usize,
    last_advance: Instant,
    /// All steps shown; if the pattern was found the final highlight is held.
    finished: bool,
}

pub struct App {
    game: Game,
    ui_config: UiConfig,
    mode: InputMode,
    input: String,
    feedback: Feedback,
    replay: Option<SearchReplay>,
    last_tick: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            game: Game::new(config.game),
            ui_config: config.ui,
            mode: InputMode::Idle,
            input: String::new(),
            feedback: Feedback::normal("System initialized. Ready to hack the vault..."),
            replay: None,
            last_tick: Instant::now(),
            should_quit: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.drive_timer();
            self.advance_replay();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Feed elapsed wall-clock seconds to the engine, one tick each.
    fn drive_timer(&mut self) {
        while self.last_tick.elapsed() >= Duration::from_secs(1) {
            self.last_tick += Duration::from_secs(1);
            let was_active = self.game.is_active();
            let report = self.game.tick();
            if was_active && report.round_ended {
                self.replay = None;
                self.mode = InputMode::Idle;
                self.input.clear();
                self.feedback = Feedback::error("Time's up! Mission failed.");
            } else if report.low_time {
                self.feedback = Feedback::warning(format!(
                    "Warning! Only {} seconds left!",
                    report.time_left_secs
                ));
            }
        }
    }

    /// Walk the search trace one step per configured interval.
    fn advance_replay(&mut self) {
        let step = Duration::from_millis(self.ui_config.search_step_ms);
        let hold = Duration::from_millis(self.ui_config.match_hold_ms);
        let Some(replay) = self.replay.as_mut() else {
            return;
        };
        if replay.finished {
            if replay.last_advance.elapsed() >= hold {
                self.replay = None;
            }
            return;
        }
        if replay.last_advance.elapsed() < step {
            return;
        }
        replay.last_advance = Instant::now();
        if replay.position + 1 < replay.steps.len() {
            replay.position += 1;
            return;
        }
        // the last attempt has had its moment on screen
        replay.finished = true;
        let label = replay.pattern_label.clone();
        let offset = replay.steps[replay.position].offset;
        let found = replay.found;
        if found {
            self.feedback =
                Feedback::success(format!("Pattern [{label}] found at position {offset}!"));
        } else {
            self.replay = None;
            self.feedback = Feedback::error(format!("Pattern [{label}] not found!"));
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if self.mode != InputMode::Idle {
            self.handle_prompt_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('i') => self.enter_mode(InputMode::Insert),
            KeyCode::Char('d') => self.enter_mode(InputMode::Delete),
            KeyCode::Char('s') => self.enter_mode(InputMode::Search),
            KeyCode::Char('r') => self.dispatch(Command::ResetSequence),
            KeyCode::Char('R') => self.dispatch(Command::Restart),
            KeyCode::Char('n') => self.dispatch(Command::Advance),
            _ => {}
        }
    }

    /// Key press while a prompt is open
    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Idle;
                self.input.clear();
            }
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == ',' || c == '-' || c == ' ' => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn enter_mode(&mut self, mode: InputMode) {
        if !self.game.is_active() {
            self.feedback =
                Feedback::error("The round is over. Press n to advance or R to restart.");
            return;
        }
        self.mode = mode;
        self.input.clear();
    }

    /// Parse the prompt buffer into a command and hand it to the engine.
    fn submit_prompt(&mut self) {
        let command = match self.mode {
            InputMode::Idle => return,
            InputMode::Insert => {
                parse_index_value(&self.input).map(|(index, value)| Command::Insert { index, value })
            }
            InputMode::Delete => parse_index(&self.input).map(|index| Command::Delete { index }),
            InputMode::Search => parse_pattern(&self.input).map(|pattern| Command::Search { pattern }),
        };
        self.mode = InputMode::Idle;
        self.input.clear();
        match command {
            Ok(command) => self.dispatch(command),
            Err(message) => self.feedback = Feedback::error(message),
        }
    }

    fn dispatch(&mut self, command: Command) {
        match self.game.apply(&command) {
            Ok(update) => self.absorb(command, update),
            Err(err) => self.feedback = Feedback::error(err.to_string()),
        }
    }

    /// Turn a successful engine update into feedback and view state.
    fn absorb(&mut self, command: Command, update: Update) {
        match (command, update) {
            (Command::Insert { index, value }, Update::Edited(report)) => {
                self.replay = None;
                self.feedback =
                    edit_feedback(&report, format!("Inserted {value} at index {index}!"));
            }
            (Command::Delete { index }, Update::Edited(report)) => {
                self.replay = None;
                self.feedback =
                    edit_feedback(&report, format!("Deleted element at index {index}."));
            }
            (Command::ResetSequence, Update::Edited(_)) => {
                self.replay = None;
                self.feedback = Feedback::normal("Sequence cleared! Ready for new operations.");
            }
            (Command::Search { pattern }, Update::Searched(report)) => {
                let label = format_digit_list(&pattern);
                self.start_replay(report, label);
            }
            (Command::Advance, Update::NewRound(snapshot)) => {
                self.replay = None;
                self.last_tick = Instant::now();
                self.feedback = Feedback::success(format!(
                    "Level {} initiated! Find the new pattern.",
                    snapshot.level
                ));
            }
            (Command::Restart, Update::NewRound(_)) => {
                self.replay = None;
                self.last_tick = Instant::now();
                self.feedback = Feedback::normal("Game restarted! Good luck, hacker.");
            }
            _ => {}
        }
    }

    fn start_replay(&mut self, report: SearchReport, label: String) {
        if report.steps.is_empty() {
            self.replay = None;
            self.feedback = Feedback::error(format!("Pattern [{label}] not found!"));
            return;
        }
        self.feedback = Feedback::normal(format!("Searching for pattern [{label}]..."));
        self.replay = Some(SearchReplay {
            steps: report.steps,
            found: report.found,
            pattern_label: label,
            position: 0,
            last_advance: Instant::now(),
            finished: false,
        });
    }

    /// Slot indices the replay is currently pointing at.
    fn highlighted_slots(&self) -> &[usize] {
        match &self.replay {
            Some(replay) => &replay.steps[replay.position].slot_indices,
            None => &[],
        }
    }

    fn prompt_line(&self) -> Option<String> {
        let label = match self.mode {
            InputMode::Idle => return None,
            InputMode::Insert => "insert (index,value)",
            InputMode::Delete => "delete (index)",
            InputMode::Search => "search (digit,digit,...)",
        };
        Some(format!("{label} > {}_", self.input))
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let snapshot = self.game.snapshot();
        let view = ViewState {
            snapshot: &snapshot,
            live_score: self.game.live_score(),
            summary: self.game.round_summary(),
            feedback: &self.feedback,
            prompt: self.prompt_line(),
            highlight: self.highlighted_slots(),
        };
        game_view::render(frame, &view);
    }
}

fn edit_feedback(report: &EditReport, success_message: String) -> Feedback {
    if report.outcome == Some(RoundOutcome::Won) {
        Feedback::success("Pattern locked in! Vault cracked.")
    } else {
        Feedback::success(success_message)
    }
}

/// Parse "index,value" from the insert prompt.
fn parse_index_value(text: &str) -> Result<(i32, i32), String> {
    let mut parts = text.split(',');
    let index = parts.next().and_then(|part| part.trim().parse().ok());
    let value = parts.next().and_then(|part| part.trim().parse().ok());
    match (index, value, parts.next()) {
        (Some(index), Some(value), None) => Ok((index, value)),
        _ => Err("Invalid input! Enter index,value (e.g. 0,5).".to_string()),
    }
}

/// Parse a bare index from the delete prompt.
fn parse_index(text: &str) -> Result<i32, String> {
    text.trim()
        .parse()
        .map_err(|_| "Invalid input! Enter an index (e.g. 0).".to_string())
}

/// Parse a comma-separated digit pattern from the search prompt.
fn parse_pattern(text: &str) -> Result<Vec<i32>, String> {
    if text.trim().is_empty() {
        return Err("Enter a pattern to search! (e.g. 2,1,4)".to_string());
    }
    text.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| "Invalid pattern! Enter comma-separated numbers.".to_string())
        })
        .collect()
}
