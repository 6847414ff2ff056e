//! TUI rendering for Taskpane using ratatui.

mod input;
mod theme;

pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use taskpane_engine::{App, SELECTOR_OPTIONS};
use taskpane_types::Strategy;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = palette(app.ui_options());
    let glyphs = glyphs(app.ui_options());

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let selector_height = SELECTOR_OPTIONS.len() as u16 + 2; // rows + border

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(selector_height), // Strategy selector
            Constraint::Min(1),                  // Results
            Constraint::Length(1),               // Status bar
        ])
        .split(frame.area());

    draw_selector(frame, app, chunks[0], &palette, &glyphs);
    draw_results(frame, app, chunks[1], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);
}

fn selector_label(option: Option<Strategy>) -> &'static str {
    option.map_or("-", Strategy::display_name)
}

fn draw_selector(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let items: Vec<ListItem> = SELECTOR_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let selected = i == app.selector_cursor();
            let pointer = if selected { glyphs.pointer } else { " " };
            let style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .bg(palette.bg_highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text_secondary)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {pointer} "), style),
                Span::styled(selector_label(*option).to_string(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .title(" Strategy ")
            .title_style(Style::default().fg(palette.text_primary)),
    );
    frame.render_widget(list, area);
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let items: Vec<ListItem> = app
        .results()
        .iter()
        .map(|entry| {
            // Sentinel results are muted, slow ones get the warning color.
            let style = if entry.starts_with('-') {
                Style::default().fg(palette.text_muted)
            } else if entry.contains("(slow)") {
                Style::default().fg(palette.warning)
            } else {
                Style::default().fg(palette.text_primary)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", glyphs.bullet), Style::default().fg(palette.bg_border)),
                Span::styled(entry.clone(), style),
            ]))
        })
        .collect();

    let title = format!(" Tasks {}/{} ", app.results().len(), app.expected_results());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .style(Style::default().bg(palette.bg_panel))
            .title(title)
            .title_style(Style::default().fg(palette.text_primary)),
    );
    frame.render_widget(list, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let status = if app.is_running() {
        let name = app
            .selected_strategy()
            .map_or("-", Strategy::display_name);
        Span::styled(
            format!(" {} Running {name}", spinner_frame(glyphs, app.frame())),
            Style::default().fg(palette.accent),
        )
    } else if let Some(strategy) = app.selected_strategy() {
        Span::styled(
            format!(" Done: {strategy}"),
            Style::default().fg(palette.success),
        )
    } else {
        Span::styled(
            " Select a strategy",
            Style::default().fg(palette.text_muted),
        )
    };

    let help = Span::styled(
        "  Up/Down select | Enter run | Esc cancel | q quit",
        Style::default().fg(palette.text_muted),
    );

    let bar = Paragraph::new(Line::from(vec![status, help]));
    frame.render_widget(bar, area);
}
