use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{RoundOutcome, RoundSummary, Snapshot, LOW_TIME_WARNING_SECS};

use super::app::{Feedback, FeedbackKind};

/// Everything the view needs to draw one frame.
pub struct ViewState<'a> {
    pub snapshot: &'a Snapshot,
    pub live_score: u32,
    pub summary: Option<RoundSummary>,
    pub feedback: &'a Feedback,
    pub prompt: Option<String>,
    /// Slot indices the search replay is currently covering.
    pub highlight: &'a [usize],
}

pub fn render(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Target pattern
            Constraint::Min(5),    // Slots
            Constraint::Length(3), // Feedback
            Constraint::Length(3), // Prompt
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_target(frame, view.snapshot, chunks[1]);
    render_slots(frame, view, chunks[2]);
    render_feedback(frame, view.feedback, chunks[3]);
    render_prompt(frame, view.prompt.as_deref(), chunks[4]);
    render_controls(frame, chunks[5]);

    if let Some(summary) = &view.summary {
        render_summary_modal(frame, summary, frame.area());
    }
}

pub(crate) fn format_digit_list<T: std::fmt::Display>(digits: &[T]) -> String {
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_header(frame: &mut Frame, view: &ViewState, area: Rect) {
    let snap = view.snapshot;
    let time_style = if snap.active && snap.time_left_secs <= LOW_TIME_WARNING_SECS {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let line = Line::from(vec![
        Span::styled(
            format!("Level: {}", snap.level),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(format!("Time: {}s", snap.time_left_secs), time_style),
        Span::raw("  |  "),
        Span::styled(
            format!("Score: {}", snap.score),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  |  "),
        Span::raw(format!("Round: {}", view.live_score)),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Code Breaker"));

    frame.render_widget(header, area);
}

fn render_target(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let target = Paragraph::new(format!("[ {} ]", format_digit_list(&snapshot.target_pattern)))
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Target Pattern"),
        );

    frame.render_widget(target, area);
}

fn render_slots(frame: &mut Frame, view: &ViewState, area: Rect) {
    let slots = &view.snapshot.slots;

    // Slot indices above the cells, same 5-column width as "[ x ]"
    let index_line: Vec<Span> = (0..slots.len())
        .map(|i| Span::styled(format!("{i:^5}"), Style::default().fg(Color::DarkGray)))
        .collect();

    let cell_line: Vec<Span> = slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let (text, style) = match slot {
                Some(digit) => (
                    format!("[ {digit} ]"),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                None => ("[ . ]".to_string(), Style::default().fg(Color::DarkGray)),
            };
            let style = if view.highlight.contains(&i) {
                style.bg(Color::Yellow).fg(Color::Black)
            } else {
                style
            };
            Span::styled(text, style)
        })
        .collect();

    let lines = vec![Line::from(index_line), Line::from(cell_line)];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Vault Sequence"),
        );

    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, feedback: &Feedback, area: Rect) {
    let color = match feedback.kind {
        FeedbackKind::Normal => Color::Cyan,
        FeedbackKind::Success => Color::Green,
        FeedbackKind::Error => Color::Red,
        FeedbackKind::Warning => Color::Yellow,
    };

    let widget = Paragraph::new(feedback.message.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, prompt: Option<&str>, area: Rect) {
    let (text, style) = match prompt {
        Some(line) => (
            line,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        None => (
            "press i, d, or s to type a command",
            Style::default().fg(Color::DarkGray),
        ),
    };

    let widget = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Input"));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("i: Insert  |  d: Delete  |  s: Search  |  r: Clear Sequence");
    let line2 = Line::from("n: Next Level  |  R: Restart  |  Enter: Submit  |  Esc: Cancel  |  q: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

/// Centered overlay with the end-of-round numbers.
fn render_summary_modal(frame: &mut Frame, summary: &RoundSummary, area: Rect) {
    let (title, color) = match summary.outcome {
        RoundOutcome::Won => ("LEVEL COMPLETE", Color::Green),
        RoundOutcome::Lost => ("TIME'S UP", Color::Red),
    };
    let footer = if summary.can_advance {
        "n: next level  |  R: restart  |  q: quit"
    } else {
        "R: restart  |  q: quit"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Time taken: {}s", summary.time_taken_secs)),
        Line::from(format!("Operations used: {}", summary.operations_used)),
        Line::from(format!("Final score: {}", summary.final_score)),
        Line::from(""),
        Line::from(Span::styled(footer, Style::default().fg(Color::DarkGray))),
    ];

    let popup = centered_rect(46, 12, area);
    frame.render_widget(Clear, popup);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Level {}", summary.level)),
        );
    frame.render_widget(widget, popup);
}

/// Fixed-size rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
