//! UI rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use pokedex_core::record::{format_dex_id, title_case, STAT_BAR_MAX};
use pokedex_core::UNIVERSE_SIZE;

use crate::app::App;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Left: list + status + search
            Constraint::Percentage(45), // Right: detail panel
        ])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Catalog list
            Constraint::Length(1), // Counts + hints
            Constraint::Length(1), // Toast line
            Constraint::Length(1), // Search input
        ])
        .split(main_chunks[0]);

    render_list(frame, app, left_chunks[0]);
    render_status(frame, app, left_chunks[1]);
    render_toast_line(frame, app, left_chunks[2]);
    render_search_input(frame, app, left_chunks[3]);

    render_detail_panel(frame, app, main_chunks[1]);
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let base = app.theme.base();
    let accent = app.theme.accent();
    let dim = app.theme.dim();

    let filtered = app.filtered();
    if filtered.is_empty() {
        let message = if app.items.is_empty() && app.is_loading() {
            "Loading catalog...".to_string()
        } else if app.query.is_empty() {
            "No entries".to_string()
        } else {
            format!("No matches for \"{}\"", app.search_input.text)
        };
        let empty = Paragraph::new(message)
            .style(dim)
            .block(Block::default().borders(Borders::ALL).style(base));
        frame.render_widget(empty, area);
        return;
    }

    let selected = app.list_state.selected();
    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let is_selected = selected == Some(i);
            let prefix = if is_selected { "▌ " } else { "  " };
            let name_style = if is_selected {
                accent.add_modifier(Modifier::BOLD)
            } else {
                base
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix.to_string(), accent),
                Span::styled(format_dex_id(record.id), dim),
                Span::styled("  ".to_string(), base),
                Span::styled(title_case(&record.name), name_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).style(base));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let dim = app.theme.dim();
    let accent = app.theme.accent();

    let shown = app.filtered().len();
    let mut spans = vec![Span::styled(
        format!("{shown} of {} loaded · {UNIVERSE_SIZE} total", app.items.len()),
        dim,
    )];

    if app.is_loading() {
        spans.push(Span::styled("  Loading...".to_string(), accent));
    } else if app.load_more_offered() {
        spans.push(Span::styled("  [Ctrl+L] load more".to_string(), accent));
    }
    spans.push(Span::styled(
        "  [Ctrl+T] theme  [Esc] quit".to_string(),
        dim,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_toast_line(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref toast) = app.toast else {
        return;
    };
    let style = if toast.is_error {
        app.theme.error()
    } else {
        app.theme.accent()
    };
    frame.render_widget(Paragraph::new(toast.message.clone()).style(style), area);
}

/// Search input with a block cursor, single line.
fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let base = app.theme.base();
    let accent = app.theme.accent();
    let cursor_style = base.add_modifier(Modifier::REVERSED);

    let (before, after) = app.search_input.text.split_at(app.search_input.cursor);
    let cursor_char = after.chars().next();
    let after_cursor = match cursor_char {
        Some(c) => &after[c.len_utf8()..],
        None => "",
    };

    let mut spans = vec![Span::styled("▌ ".to_string(), accent)];
    if !before.is_empty() {
        spans.push(Span::styled(before.to_string(), base));
    }
    match cursor_char {
        Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
        None => spans.push(Span::styled(" ".to_string(), cursor_style)),
    }
    if !after_cursor.is_empty() {
        spans.push(Span::styled(after_cursor.to_string(), base));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let base = app.theme.base();
    let dim = app.theme.dim();
    let accent = app.theme.accent();

    let block = Block::default()
        .borders(Borders::ALL)
        .style(base)
        .title(" Details ");

    let Some(ref detail) = app.selected_detail else {
        let message = if app.is_loading_details() {
            "Loading..."
        } else {
            "No entry selected"
        };
        frame.render_widget(Paragraph::new(message).style(dim).block(block), area);
        return;
    };

    let types = detail
        .types
        .iter()
        .map(|t| title_case(&t.type_name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                title_case(&detail.name),
                accent.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", format_dex_id(detail.id)), dim),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled("Height  ".to_string(), dim),
            Span::styled(format!("{:.1} m", detail.height_m()), base),
        ]),
        Line::from(vec![
            Span::styled("Weight  ".to_string(), dim),
            Span::styled(format!("{:.1} kg", detail.weight_kg()), base),
        ]),
        Line::from(vec![
            Span::styled("Types   ".to_string(), dim),
            Span::styled(types, base),
        ]),
        Line::from(vec![
            Span::styled("Artwork ".to_string(), dim),
            Span::styled(pokedex_api::artwork_url(detail.id), dim),
        ]),
        Line::default(),
    ];

    for stat in &detail.stats {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", stat.stat_name), dim),
            Span::styled(format!("{:>3} ", stat.base_stat), base),
            Span::styled(stat_bar(stat.base_stat, 20), accent),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Horizontal bar for a base stat, scaled against [`STAT_BAR_MAX`].
fn stat_bar(value: u32, width: usize) -> String {
    let filled = (value.min(STAT_BAR_MAX) as usize * width) / STAT_BAR_MAX as usize;
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..width {
        bar.push('░');
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_bar_scales_against_max() {
        assert_eq!(stat_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(stat_bar(100, 10), "█████░░░░░");
        assert_eq!(stat_bar(200, 10), "██████████");
    }

    #[test]
    fn test_stat_bar_clamps_out_of_range_values() {
        assert_eq!(stat_bar(999, 10), "██████████");
    }

    #[test]
    fn test_stat_bar_width_is_constant() {
        for value in [0, 35, 90, 130, 255] {
            assert_eq!(stat_bar(value, 20).chars().count(), 20);
        }
    }
}
