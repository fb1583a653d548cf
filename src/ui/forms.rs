use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use pomo::{background::PRESETS, forms::TextField, mode::Mode};

use crate::App;

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn popup(f: &mut Frame, title: &str, percent_y: u16) -> Rect {
    let area = centered_rect(70, percent_y, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .title_bottom("(enter) save  (esc) cancel");
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

fn input_line(label: String, field: &TextField, focused: bool) -> Line<'_> {
    let label_style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Line::from(vec![
        Span::styled(label, label_style),
        Span::raw(field.value()),
    ])
}

fn place_cursor(f: &mut Frame, area: Rect, row: u16, col: usize) {
    if row < area.height {
        let x = area.x + (col as u16).min(area.width.saturating_sub(1));
        f.set_cursor_position(Position::new(x, area.y + row));
    }
}

fn error_line(error: &Option<String>) -> Line<'_> {
    match error {
        Some(err) => Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
        None => Line::default(),
    }
}

const MINUTES_LABEL_WIDTH: usize = 14;

pub fn render_settings(app: &mut App, f: &mut Frame) {
    let inner = popup(f, "Settings (minutes)", 40);
    let form = &app.settings_form;

    let mut lines: Vec<Line> = Mode::ALL
        .iter()
        .zip(form.fields.iter())
        .enumerate()
        .map(|(i, (mode, field))| {
            let label = format!("{:<width$}", mode.tab_label(), width = MINUTES_LABEL_WIDTH);
            input_line(label, field, i == form.focus)
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(tab) next field",
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    if app.controller.cycle().is_running() {
        lines.push(Line::from(Span::styled(
            "the running countdown keeps going, capped at the new length",
            Style::default().fg(Color::Yellow),
        )));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    place_cursor(
        f,
        inner,
        form.focus as u16,
        MINUTES_LABEL_WIDTH + form.fields[form.focus].width(),
    );
}

pub fn render_background(app: &mut App, f: &mut Frame) {
    let inner = popup(f, "Background", 60);
    let form = &app.background_form;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let items: Vec<ListItem> = PRESETS.iter().map(|p| ListItem::new(p.id)).collect();
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(form.selected));
    f.render_stateful_widget(list, chunks[0], &mut state);

    f.render_widget(
        Paragraph::new(Span::styled(
            "(up/down) preset, or type an image URL or file path",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        chunks[1],
    );
    let label = "Custom: ";
    f.render_widget(Paragraph::new(input_line(label.to_string(), &form.input, true)), chunks[2]);
    f.render_widget(Paragraph::new(error_line(&form.error)), chunks[3]);
    place_cursor(f, chunks[2], 0, label.len() + form.input.width());
}

pub fn render_playlist(app: &mut App, f: &mut Frame) {
    let inner = popup(f, "Playlist", 40);
    let form = &app.playlist_form;

    let label = "Link: ";
    let lines = vec![
        Line::from(vec![
            Span::styled("Current: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(app.playlist.url()),
        ]),
        Line::default(),
        input_line(label.to_string(), &form.input, true),
        error_line(&form.error),
        Line::default(),
        Line::from(Span::styled(
            "paste a Spotify playlist link or spotify:playlist:<id>",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
    place_cursor(f, inner, 2, label.len() + form.input.width());
}
