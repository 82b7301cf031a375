//! Stateless UI rendering for the quiz.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use strictly_capitals::{ChoiceSelector, SelectMode};

use super::app::App;
use super::input::Focus;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let controller = app.controller();
    let multiple_height = selector_height(app.multiple());
    let single_height = selector_height(app.single());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Title
            Constraint::Length(1),               // Prompt
            Constraint::Length(1),               // Alert
            Constraint::Length(3),               // Country
            Constraint::Length(1),               // Answer
            Constraint::Length(multiple_height), // Multiple selector
            Constraint::Length(single_height),   // Single selector
            Constraint::Length(3),               // Buttons
            Constraint::Length(1),               // Round and score
            Constraint::Min(0),
            Constraint::Length(1),               // Help
        ])
        .split(area);

    let title = Paragraph::new("Guess Capital")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let prompt = Paragraph::new("Find the capital of the following country...")
        .alignment(Alignment::Center);
    frame.render_widget(prompt, chunks[1]);

    if let Some(alert) = controller.alert() {
        let alert = Paragraph::new(alert.to_string())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(alert, chunks[2]);
    }

    let country = Paragraph::new(controller.round().asked().country().as_str())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(country, chunks[3]);

    let mut answer = vec![Span::raw("Answer: ")];
    if let Some(capital) = controller.revealed_answer() {
        answer.push(Span::styled(
            capital,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(answer)).alignment(Alignment::Center),
        chunks[4],
    );

    let scoring = controller.rules().scoring;
    draw_selector(
        frame,
        chunks[5],
        app,
        SelectMode::Multiple,
        format!("Multiple ~ Selection {}", scoring.multiple_label()),
        app.focus() == &Focus::Multiple,
    );
    draw_selector(
        frame,
        chunks[6],
        app,
        SelectMode::Single,
        format!("Single ~ Selection {}", scoring.single_label()),
        app.focus() == &Focus::Single,
    );

    draw_buttons(frame, chunks[7], app);

    let status = format!(
        "Round: {}/{}    Score: {}",
        controller.displayed_round(),
        controller.rules().max_rounds,
        controller.game().score()
    );
    frame.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(Color::Magenta))
            .alignment(Alignment::Center),
        chunks[8],
    );

    let help = Paragraph::new(
        "Tab: Focus | Enter/Space: Open/Pick | ↑↓: Highlight | Del: Clear | c: Check | n: Next | r: New | q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[10]);

    if controller.is_game_over() {
        draw_game_over(frame, area, app);
    }
}

/// Rows a selector needs: a bordered summary line, plus the list when open.
fn selector_height(selector: &ChoiceSelector) -> u16 {
    let list = if *selector.is_open() {
        u16::try_from(selector.candidates().len()).unwrap_or(u16::MAX)
    } else {
        0
    };
    list.saturating_add(3)
}

fn draw_selector(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    mode: SelectMode,
    title: String,
    focused: bool,
) {
    let selector = app.selector(mode);
    let selection = app.controller().round().selection();
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let chosen = selector.chosen(selection);
    let summary = if chosen.is_empty() {
        Line::from(vec![
            Span::styled(selector.placeholder(), Style::default().fg(Color::DarkGray)),
            Span::raw("  ▼"),
        ])
    } else {
        let mut spans: Vec<Span> = chosen
            .iter()
            .flat_map(|fact| {
                let chip = match mode {
                    SelectMode::Multiple => format!("[{} ×]", fact.capital()),
                    SelectMode::Single => fact.capital().clone(),
                };
                [
                    Span::styled(chip, Style::default().fg(Color::Cyan)),
                    Span::raw(" "),
                ]
            })
            .collect();
        spans.push(Span::raw(" ▼"));
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(summary), rows[0]);

    if !*selector.is_open() {
        return;
    }

    let items: Vec<ListItem> = selector
        .candidates()
        .iter()
        .map(|candidate| {
            let marked = selector.is_selected(selection, candidate);
            let style = if marked {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mark = if marked { "✔ " } else { "  " };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", mark, candidate.capital()),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::White).fg(Color::Black))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(*selector.highlighted());
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let controller = app.controller();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let check_enabled = *controller.game().phase() == strictly_capitals::Phase::Active;
    draw_button(frame, cols[0], "Check", check_enabled, app.focus() == &Focus::Check);
    if app.next_round_visible() {
        draw_button(
            frame,
            cols[1],
            "Next Round",
            true,
            app.focus() == &Focus::NextRound,
        );
    }
    draw_button(frame, cols[2], "New Game", true, app.focus() == &Focus::NewGame);
}

fn draw_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool, focused: bool) {
    let style = match (enabled, focused) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::White),
    };
    let button = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn draw_game_over(frame: &mut Frame, area: Rect, app: &App) {
    let controller = app.controller();
    let results = controller.game().results();
    let rows = u16::try_from(results.len()).unwrap_or(u16::MAX);
    let height = rows.saturating_add(6).min(area.height);
    let popup = center_rect(area, 36.min(area.width), height);

    let mut lines = vec![
        Line::from(Span::styled(
            controller.game_over_message().unwrap_or_default(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Final Score: {}", controller.game().score())),
        Line::from(""),
    ];
    lines.extend(results.iter().map(|r| {
        Line::from(format!("Round {}: {} points", r.round(), r.score()))
    }));
    lines.push(Line::from(Span::styled(
        "r: New Game | q: Quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Results")),
        popup,
    );
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
