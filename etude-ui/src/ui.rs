//! Phase-dependent rendering. The UI is a thin view over `SessionState`;
//! it draws what the dispatch layer decided and nothing more.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use etude_types::{ChordSet, Clef, Phase, SessionState};

pub fn draw(frame: &mut Frame, state: &SessionState, selected_port: usize, status: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let title = Line::from(Span::styled(
        " etude ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), chunks[0]);

    match state.phase {
        Phase::Waiting => draw_waiting(frame, state, chunks[1]),
        Phase::SelectingDevice => draw_device_list(frame, state, selected_port, chunks[1]),
        Phase::DeviceSelected => draw_round(frame, state, chunks[1]),
        Phase::SessionEnded => draw_summary(frame, state, chunks[1]),
    }

    draw_footer(frame, state, status, chunks[2]);
}

fn draw_waiting(frame: &mut Frame, state: &SessionState, area: Rect) {
    let mut lines = vec![Line::from("Waiting for a MIDI backend...")];
    if let Some(err) = &state.last_error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    let block = Block::default().borders(Borders::ALL).title(" MIDI ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_device_list(frame: &mut Frame, state: &SessionState, selected_port: usize, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Select input device ");

    if state.ports.is_empty() {
        let lines = vec![Line::from(Span::styled(
            "No input devices found",
            Style::default().fg(Color::DarkGray),
        ))];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let items: Vec<ListItem> = state
        .ports
        .iter()
        .map(|name| ListItem::new(name.clone()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(selected_port.min(state.ports.len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_round(frame: &mut Frame, state: &SessionState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(area);

    let context = format!(
        "{} clef, key of {}",
        state.active_clef.name(),
        state.active_key.name()
    );
    let chord_name = state
        .active_chord
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let target = state
        .active_chord
        .as_ref()
        .map(|c| {
            c.pitches
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join("  ")
        })
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(context, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", chord_name),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {}", target),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let played = state
        .played_notes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(Line::from(vec![
        Span::raw("Played: "),
        Span::styled(played, Style::default().fg(Color::White)),
    ]));

    if let Some(feedback) = &state.feedback {
        let color = if feedback.starts_with("Correct") {
            Color::Green
        } else {
            Color::Red
        };
        lines.push(Line::from(Span::styled(
            feedback.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    let chord_block = Block::default().borders(Borders::ALL).title(" Play this chord ");
    frame.render_widget(Paragraph::new(lines).block(chord_block), rows[0]);

    let score = format!(
        "Score: {}/{}   Round: {:.1}s   Mean: {:.1}s",
        state.success_count,
        state.total_count,
        state.elapsed_ms as f64 / 1000.0,
        state.mean_ms / 1000.0,
    );
    let filters = format!(
        "Sets: {}   Clefs: {}",
        filter_marks(
            &[ChordSet::MajorTriads, ChordSet::MinorTriads],
            |s| state.filters.chord_set_enabled(*s),
            |s| s.name(),
        ),
        filter_marks(
            &[Clef::Treble, Clef::Bass],
            |c| state.filters.clef_enabled(*c),
            |c| c.name(),
        ),
    );
    let status_block = Block::default().borders(Borders::ALL).title(" Session ");
    frame.render_widget(
        Paragraph::new(vec![Line::from(score), Line::from(filters)]).block(status_block),
        rows[1],
    );
}

fn filter_marks<T>(
    all: &[T],
    enabled: impl Fn(&T) -> bool,
    name: impl Fn(&T) -> &'static str,
) -> String {
    all.iter()
        .map(|item| {
            let mark = if enabled(item) { "[x]" } else { "[ ]" };
            format!("{} {}", mark, name(item))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn draw_summary(frame: &mut Frame, state: &SessionState, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Session complete",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Correct: {} of {}",
            state.success_count, state.total_count
        )),
        Line::from(format!("Mean round time: {:.1}s", state.mean_ms / 1000.0)),
    ];
    let block = Block::default().borders(Borders::ALL).title(" Results ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(frame: &mut Frame, state: &SessionState, status: Option<&str>, area: Rect) {
    let hints = match state.phase {
        Phase::Waiting => "r rescan   q quit",
        Phase::SelectingDevice => "up/down select   enter connect   r rescan   q quit",
        Phase::DeviceSelected => "1/2 chord sets   t/b clefs   e end session   q quit",
        Phase::SessionEnded => "q quit",
    };
    let mut lines = vec![Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(msg) = status {
        lines.insert(
            0,
            Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Yellow))),
        );
    }
    frame.render_widget(Paragraph::new(lines), area);
}
