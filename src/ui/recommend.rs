use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::recommend::Presentation;
use crate::state::RequestState;

use super::Theme;
use super::widgets::titled_block;

const APP_TITLE: &str = "Anime Recommendation App";
const PLACEHOLDER: &str = "Enter genres (e.g., Horror, Romance)";
const BUTTON_LABEL: &str = "Get Recommendation";
const ANILIST_HOME: &str = "https://anilist.co";

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn render_recommend_view(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    state: &RequestState,
    tick: usize,
    theme: &Theme,
) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(Line::styled(
        APP_TITLE,
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    render_genre_input(frame, chunks[1], input, theme);
    render_button(frame, chunks[2], state.is_loading(), tick, theme);

    if let RequestState::Failure(err) = state {
        let error = Paragraph::new(Line::styled(err.message(), Style::default().fg(theme.error)))
            .alignment(Alignment::Center);
        frame.render_widget(error, chunks[3]);
    }

    if let RequestState::Success(item) = state {
        render_card(frame, chunks[4], &Presentation::from(item), theme);
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Powered by ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            "AniList",
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Span::styled(
            format!(" ({})", ANILIST_HOME),
            Style::default().fg(theme.text_secondary),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[5]);
}

fn render_genre_input(frame: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let text = if input.is_empty() {
        Line::styled(PLACEHOLDER, Style::default().fg(theme.text_secondary))
    } else {
        Line::styled(input, Style::default().fg(theme.text_primary))
    };

    let field = Paragraph::new(text).block(titled_block("Genres", theme.primary));
    frame.render_widget(field, area);

    let width = input.chars().count() as u16;
    let max_x = area.x + area.width.saturating_sub(2);
    frame.set_cursor_position(((area.x + width + 1).min(max_x), area.y + 1));
}

fn render_button(frame: &mut Frame, area: Rect, loading: bool, tick: usize, theme: &Theme) {
    // Disabled while a request is in flight
    let (label, style) = if loading {
        (
            format!("{} Loading...", SPINNER[tick % SPINNER.len()]),
            Style::default().fg(theme.text_secondary),
        )
    } else {
        (
            BUTTON_LABEL.to_string(),
            Style::default()
                .fg(theme.text_primary)
                .bg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        )
    };

    let border = if loading {
        theme.text_secondary
    } else {
        theme.secondary
    };

    let button = Paragraph::new(Line::styled(label, style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(button, area);
}

fn render_card(frame: &mut Frame, area: Rect, card: &Presentation, theme: &Theme) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Genres: ",
                Style::default()
                    .fg(theme.text_secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(card.genres.as_str(), Style::default().fg(theme.text_secondary)),
        ]),
        Line::raw(""),
    ];

    let body = lines
        .into_iter()
        .chain(
            card.description
                .lines()
                .map(|l| Line::styled(l, Style::default().fg(theme.text_primary))),
        )
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(body)
        .block(titled_block(&card.title, theme.secondary).style(Style::default().bg(theme.paper)))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
