pub mod clock;
pub mod forms;
pub mod screen;

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Widget},
};

use pomo::mode::{Mode, SESSIONS_PER_ROUND};

use crate::{
    ui::clock::{end_time, format_time},
    App,
};

const HORIZONTAL_MARGIN: u16 = 2;

pub fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Work => Color::Red,
        Mode::ShortBreak => Color::Green,
        Mode::LongBreak => Color::Blue,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cycle = self.controller.cycle();
        let mode = cycle.mode();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let accent_style = Style::default().patch(bold_style).fg(mode_color(mode));
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Tabs::new(Mode::ALL.iter().map(Mode::tab_label))
            .block(Block::default().borders(Borders::ALL).title("pomo"))
            .select(mode.index())
            .style(dim_style)
            .highlight_style(accent_style)
            .divider("|")
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(mode.headline(), accent_style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(
            format_time(cycle.remaining_secs()),
            bold_style.add_modifier(Modifier::REVERSED),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        let status = if cycle.is_running() {
            match end_time(Local::now().naive_local(), cycle.remaining_secs()) {
                Some(end) => format!("running, ends at {end}"),
                None => "running".to_string(),
            }
        } else {
            "paused".to_string()
        };
        Paragraph::new(Span::styled(status, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let ratio = cycle.progress_fraction().clamp(0.0, 1.0);
        Gauge::default()
            .gauge_style(Style::default().fg(mode_color(mode)))
            .ratio(ratio)
            .label(format!("{:.0}%", ratio * 100.0))
            .render(chunks[5], buf);

        Paragraph::new(format!(
            "Round: {} | Session: {} / {}",
            cycle.round_number(),
            cycle.session_in_round(),
            SESSIONS_PER_ROUND
        ))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

        Paragraph::new(format!(
            "Total Completed: {}",
            cycle.completed_sessions()
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);

        let sound = if self.controller.alert().is_silent() {
            format!("{} (muted)", self.controller.sound().name())
        } else {
            self.controller.sound().name()
        };
        let details = [
            ("Sound", sound),
            ("Background", self.background.current().label()),
            ("Playlist", self.playlist.url().to_string()),
        ];
        for (row, (label, value)) in details.into_iter().enumerate() {
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{label}: "), dim_style),
                Span::raw(value),
            ]))
            .alignment(Alignment::Center)
            .render(chunks[10 + row], buf);
        }

        if let Some(notice) = &self.notice {
            Paragraph::new(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Yellow),
            ))
            .alignment(Alignment::Center)
            .render(chunks[13], buf);
        }

        let legend = Paragraph::new(Span::styled(
            "(space) start/pause  (r)eset  (1/2/3) mode  (s)ettings  (b)ackground  (p)laylist  (a) sound  (o/O) open  (q)uit",
            italic_style,
        ))
        .alignment(Alignment::Center);
        legend.render(chunks[14], buf);
    }
}
