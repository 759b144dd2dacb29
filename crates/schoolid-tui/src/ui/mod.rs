use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use schoolid_core::rules::StatusKind;

use crate::app::{
    App, ConfirmState, Mode, BUTTON_CLEAR, BUTTON_COPY, BUTTON_RESET, BUTTON_SEARCH, FIELD_NAME,
    FIELD_STUDENT_NO,
};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(size);

    render_header(frame, chunks[0], app);
    render_form(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_result(frame, chunks[3], app);
    render_footer(frame, chunks[4], app);

    if let Mode::Confirm(state) = &app.mode {
        render_confirm(frame, size, state);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let title = format!("schoolid  account ID lookup  backend: {}", app.source_name);
    let paragraph =
        Paragraph::new(Line::from(title)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Lookup");

    let search_label = if app.is_searching() {
        "[Searching...]"
    } else {
        "[Search]"
    };
    let buttons = Line::from(vec![
        button_span(search_label, app.focus == BUTTON_SEARCH, Color::Green),
        Span::raw("  "),
        button_span("[Clear]", app.focus == BUTTON_CLEAR, Color::Yellow),
        Span::raw("  "),
        button_span("[Copy ID]", app.focus == BUTTON_COPY, Color::Cyan),
        Span::raw("  "),
        button_span("[Reset PW]", app.focus == BUTTON_RESET, Color::Red),
    ]);

    let lines = vec![
        field_line(
            "Student number (3-10 digits)",
            &app.student_no,
            app.focus == FIELD_STUDENT_NO,
        ),
        field_line("Name", &app.name, app.focus == FIELD_NAME),
        Line::from(""),
        buttons,
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let line = Line::from(Span::styled(
        app.display.status.message.clone(),
        status_style(app.display.status.kind),
    ));
    let paragraph =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(paragraph, area);
}

fn render_result(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let style = if app.display.has_result() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = Line::from(Span::styled(app.display.result_text().to_string(), style));
    let paragraph =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Account ID"));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::Form => "tab next  shift+tab prev  enter select  ctrl+u clear field  esc quit",
        Mode::Confirm(_) => "y confirm  n/esc cancel",
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &ConfirmState) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let paragraph = Paragraph::new(state.message.clone())
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn button_span(label: &str, focused: bool, color: Color) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(label.to_string(), style)
}

fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Idle => Style::default().fg(Color::DarkGray),
        StatusKind::Searching => Style::default().fg(Color::Yellow),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
