use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LoadState};
use crate::gacha::{GachaEngine, Phase};
use crate::layout::{clamp_lines, rem_to_cells, PresentationParams};
use crate::ticker::Ticker;

// Sunset orange palette
const BG_DARK: Color = Color::Rgb(24, 12, 10);            // Deep background
const ORANGE: Color = Color::Rgb(249, 115, 22);           // #F97316 - Primary accent
const ORANGE_SOFT: Color = Color::Rgb(251, 146, 60);      // #FB923C - Spinning border
const PEACH: Color = Color::Rgb(254, 215, 170);           // #FED7AA - Resting border
const AMBER: Color = Color::Rgb(245, 158, 11);            // #F59E0B - Selected border
const RUST: Color = Color::Rgb(154, 52, 18);              // #9A3412 - Topic text
const BROWN: Color = Color::Rgb(146, 64, 14);             // #92400E - Secondary text
const STOP_RED: Color = Color::Rgb(220, 38, 38);          // #DC2626 - Stop button
const ERROR_RED: Color = Color::Rgb(185, 28, 28);         // #B91C1C - Errors
const CREAM: Color = Color::Rgb(255, 247, 237);           // #FFF7ED - Spinning card
const PAPER: Color = Color::Rgb(255, 255, 255);           // Resting card
const NOTE_BG: Color = Color::Rgb(254, 243, 199);         // #FEF3C7 - Result note

const TITLE: &str = "Chat Gacha";
const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Card rows around the clamped topic lines: two borders, one padding row
/// above and below.
const CARD_CHROME_ROWS: u16 = 4;

pub fn draw(frame: &mut Frame, app: &App) {
    let bg = Block::default().style(Style::default().bg(BG_DARK));
    frame.render_widget(bg, frame.area());

    let params = app.presentation();
    let cell_px = app.config.cell_width_px;
    let area = page_area(frame.area(), &params, cell_px);

    match &app.load {
        LoadState::Loading => draw_loading(frame, app, area),
        LoadState::Failed(e) => draw_error(frame, &e.to_string(), area),
        LoadState::Ready(engine) => draw_picker(frame, app, engine, &params, area),
    }
}

/// The page is the viewport minus its padding, capped at the breakpoint's
/// maximum width and centred.
fn page_area(area: Rect, params: &PresentationParams, cell_px: u16) -> Rect {
    let padding = rem_to_cells(params.page_padding_rem, cell_px);
    let max_width = rem_to_cells(params.page_max_width_rem, cell_px);
    let inner = Rect {
        x: area.x + padding.min(area.width / 2),
        y: area.y + area.height.min(1),
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(2),
    };
    centered(inner, max_width)
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn draw_loading(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(1),   // Spinner
            Constraint::Length(1),   // Gap
            Constraint::Length(1),   // Label
            Constraint::Min(0),
        ])
        .split(area);

    let spinner = SPINNER_FRAMES[(app.ui.animation_frame / 2) % SPINNER_FRAMES.len()];
    frame.render_widget(
        Paragraph::new(spinner)
            .alignment(Alignment::Center)
            .style(Style::default().fg(ORANGE).add_modifier(Modifier::BOLD)),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new("Loading topics...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(PEACH)),
        chunks[3],
    );
}

fn draw_error(frame: &mut Frame, message: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(3)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ERROR_RED));
    let error = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(ERROR_RED).bg(PAPER));
    frame.render_widget(error, chunks[1]);
}

fn draw_picker<T: Ticker>(
    frame: &mut Frame,
    app: &App,
    engine: &GachaEngine<T>,
    params: &PresentationParams,
    area: Rect,
) {
    let cell_px = app.config.cell_width_px;
    let panel_padding = rem_to_cells(params.panel_padding_rem, cell_px);
    let area = Rect {
        x: area.x + panel_padding.min(area.width / 2),
        width: area.width.saturating_sub(panel_padding * 2),
        ..area
    };
    let card_rows = params.topic_max_lines as u16 + CARD_CHROME_ROWS;
    let has_result = engine.selected_topic().is_some();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                              // Title
            Constraint::Length(1),                              // Gap
            Constraint::Length(card_rows),                      // Topic card
            Constraint::Length(1),                              // Gap
            Constraint::Length(3),                              // Button
            Constraint::Length(1),                              // Gap
            Constraint::Length(if has_result { 3 } else { 0 }), // Result note
            Constraint::Min(0),
            Constraint::Length(1),                              // Status / hints
        ])
        .split(area);

    draw_title(frame, params, chunks[0]);

    let card_width = rem_to_cells(params.card_max_width_rem, cell_px);
    draw_card(frame, engine, params, cell_px, centered(chunks[2], card_width));
    draw_button(frame, engine.phase(), params, cell_px, chunks[4]);
    if has_result {
        draw_result_note(frame, params, centered(chunks[6], card_width));
    }
    draw_footer(frame, app, chunks[8]);
}

fn draw_title(frame: &mut Frame, params: &PresentationParams, area: Rect) {
    // Large title sizes render letter-spaced.
    let text = if params.title_font_rem >= 3.0 {
        TITLE
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        TITLE.to_string()
    };
    let title = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(ORANGE).add_modifier(Modifier::BOLD));
    frame.render_widget(title, area);
}

fn draw_card<T: Ticker>(
    frame: &mut Frame,
    engine: &GachaEngine<T>,
    params: &PresentationParams,
    cell_px: u16,
    area: Rect,
) {
    let (border_color, border_type, card_bg) = match engine.phase() {
        Phase::Spinning => (ORANGE_SOFT, BorderType::Thick, CREAM),
        Phase::Stopped => (AMBER, BorderType::Thick, PAPER),
        Phase::Idle => (PEACH, BorderType::Rounded, PAPER),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(card_bg));

    let displayed = engine.displayed_topic().filter(|_| engine.has_started());
    if let Some(topic) = displayed {
        block = block.title(Span::styled(
            format!(" {} ", topic.genre),
            Style::default().fg(BROWN),
        ));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(2),
        ..inner
    };

    let Some(topic) = displayed else {
        let prompt = if engine.catalog().is_empty() {
            "No topics available"
        } else {
            "Press start to draw a topic"
        };
        let placeholder = Paragraph::new(prompt)
            .alignment(Alignment::Center)
            .style(Style::default().fg(RUST));
        frame.render_widget(placeholder, centered_vertically(text_area, 1));
        return;
    };

    let padding = rem_to_cells(params.topic_padding_rem, cell_px);
    let text_width = text_area.width.saturating_sub(padding * 2).max(1);
    let lines: Vec<Line> = clamp_lines(&topic.topic, text_width as usize, params.topic_max_lines)
        .into_iter()
        .map(Line::from)
        .collect();
    let rows = lines.len() as u16;

    let mut style = Style::default().fg(RUST);
    if params.topic_font_rem >= 2.0 {
        style = style.add_modifier(Modifier::BOLD);
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(paragraph, centered_vertically(text_area, rows));
}

fn centered_vertically(area: Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    Rect {
        y: area.y + (area.height - rows) / 2,
        height: rows,
        ..area
    }
}

fn draw_button(frame: &mut Frame, phase: Phase, params: &PresentationParams, cell_px: u16, area: Rect) {
    let (label, color) = if phase == Phase::Spinning {
        ("STOP", STOP_RED)
    } else {
        ("START", ORANGE)
    };

    let side_padding = rem_to_cells(params.button_padding_rem.1, cell_px);
    let width = label.len() as u16 + side_padding * 2 + 2;
    let mut style = Style::default().fg(PAPER).bg(color);
    if params.button_font_rem >= 1.5 {
        style = style.add_modifier(Modifier::BOLD);
    }

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(button, centered(area, width));
}

fn draw_result_note(frame: &mut Frame, params: &PresentationParams, area: Rect) {
    let mut style = Style::default().fg(BROWN).bg(NOTE_BG);
    if params.message_font_rem >= 1.5 {
        style = style.add_modifier(Modifier::BOLD);
    }
    let note = Paragraph::new("Let's talk about this topic!")
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(AMBER).bg(NOTE_BG)),
        );
    frame.render_widget(note, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.ui.status_message {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(vec![
            Span::styled("Space", Style::default().fg(ORANGE)),
            Span::styled(" start/stop  ", Style::default().fg(PEACH)),
            Span::styled("q", Style::default().fg(ORANGE)),
            Span::styled(" quit", Style::default().fg(PEACH)),
        ]),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
