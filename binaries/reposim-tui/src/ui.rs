//! UI rendering for the simulator
//!
//! One screen: header, URL form, a body that depends on the session status,
//! and a footer. Help is drawn on top when open.

use crate::app::{App, Focus};
use crate::theme::{Styles, ThemePalette};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph,
        Wrap,
    },
    Frame,
};
use reposim_core::{CodeAnalysis, Side};
use reposim_view::{AppStatus, TreeState};

const HINT: &str = "e.g., github.com/facebook/react";
const DISCLAIMER: &str = "This is a simulation and does not actually access your code.";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();

    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base_style()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // URL form
            Constraint::Min(8),    // Body
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(frame, app, &palette, chunks[0]);
    render_form(frame, app, &palette, chunks[1]);

    match app.session.status() {
        AppStatus::Idle => render_idle(frame, &palette, chunks[2]),
        AppStatus::Loading => render_loading(frame, app, &palette, chunks[2]),
        AppStatus::Success => render_results(frame, app, &palette, chunks[2]),
        AppStatus::Error => render_error(frame, app, &palette, chunks[2]),
    }

    render_footer(frame, &palette, chunks[3]);

    if app.show_help {
        render_help_overlay(frame, &palette);
    }
}

fn render_header(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let status_color = match app.session.status() {
        AppStatus::Idle => palette.text_muted,
        AppStatus::Loading => palette.accent,
        AppStatus::Success => palette.success,
        AppStatus::Error => palette.error,
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" GitHub Repo Clone Simulator ", Styles::header(palette)),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", app.session.status().display()),
            Style::default()
                .fg(palette.bg)
                .bg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  model: {}", app.model()), palette.muted_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .style(palette.base_style()),
    );
    frame.render_widget(header, area);
}

fn render_form(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let enabled = app.session.status().form_enabled();
    let is_active = app.focus == Focus::Input && enabled;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)])
        .split(area);

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled("Repository URL", palette.title_style(is_active)),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(if is_active { BorderType::Thick } else { BorderType::Rounded })
        .border_style(palette.border_style(is_active))
        .style(palette.input_style(is_active));

    let text = if app.input.is_empty() {
        Span::styled(HINT, palette.muted_style())
    } else {
        Span::styled(app.input.as_str(), Style::default().fg(palette.text_primary))
    };
    let input = Paragraph::new(Line::from(vec![Span::styled("> ", palette.primary_style()), text]))
        .block(block);
    frame.render_widget(input, chunks[0]);

    let (label, style) = if enabled {
        ("[ Analyze ]", palette.primary_style().add_modifier(Modifier::BOLD))
    } else {
        ("[ Analyzing... ]", palette.muted_style())
    };
    let button = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style(false)),
        );
    frame.render_widget(button, chunks[1]);

    if is_active {
        let max_x = chunks[0].x + chunks[0].width.saturating_sub(2);
        let cursor_x = (chunks[0].x + 3 + app.input_cursor as u16).min(max_x);
        frame.set_cursor_position((cursor_x, chunks[0].y + 1));
    }
}

fn render_idle(frame: &mut Frame, palette: &ThemePalette, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter a public GitHub repository URL and press Enter.",
            palette.primary_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "A generated breakdown of its frontend and backend will appear here.",
            palette.muted_style(),
        )),
        Line::from(Span::styled("F1 shows all keys.", palette.muted_style())),
    ];
    let idle = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(idle, area);
}

fn render_loading(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled("Analyzing Repository", palette.title_style(true)),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(true))
        .padding(Padding::new(2, 2, 1, 0))
        .style(palette.base_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Target
            Constraint::Length(1), // Gauge
            Constraint::Length(2), // Message
            Constraint::Min(0),
        ])
        .split(inner);

    let url = app.submitted_url.as_deref().unwrap_or_default();
    let target = Paragraph::new(Span::styled(
        truncate_str(url, inner.width as usize),
        palette.muted_style(),
    ));
    frame.render_widget(target, chunks[0]);

    let progress = app.session.progress();
    let gauge = Gauge::default()
        .gauge_style(Styles::gauge_filled(palette))
        .ratio(progress.ratio())
        .label(format!("{}/{}", progress.step() + 1, reposim_view::LOADING_STEPS.len()));
    frame.render_widget(gauge, chunks[1]);

    let message = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(progress.message(), palette.accent_style()),
            Span::styled("   Esc to cancel", palette.muted_style()),
        ]),
    ]);
    frame.render_widget(message, chunks[2]);
}

fn render_error(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let message = app.session.error().unwrap_or_default();
    let error = Paragraph::new(Span::styled(message, palette.error_style()))
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::raw(" "),
                    Span::styled("Error", palette.error_style().add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                ]))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.error_style())
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: true });

    let height = 5.min(area.height);
    frame.render_widget(error, Rect { height, ..area });
}

fn render_results(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (side, column) in [Side::Frontend, Side::Backend].into_iter().zip(columns.iter()) {
        if let Some(analysis) = app.analysis(side) {
            let focused = app.focus == Focus::Tree(side);
            render_column(frame, palette, side, analysis, app.session.tree(side), focused, *column);
        }
    }
}

fn render_column(
    frame: &mut Frame,
    palette: &ThemePalette,
    side: Side,
    analysis: &CodeAnalysis,
    tree: &TreeState,
    focused: bool,
    area: Rect,
) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(side.title(), palette.title_style(focused)),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
        .border_style(palette.border_style(focused))
        .padding(Padding::horizontal(1))
        .style(palette.base_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // AI Analysis
            Constraint::Length(3),      // Key Technologies
            Constraint::Min(3),         // Simulated File Structure
        ])
        .split(inner);

    let summary = Paragraph::new(vec![
        section_title("AI Analysis", palette),
        Line::from(analysis.analysis.as_str()),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(summary, chunks[0]);

    let mut tags: Vec<Span> = Vec::new();
    for tech in &analysis.technologies {
        tags.push(Span::styled(format!(" {} ", tech), Styles::technology(palette)));
        tags.push(Span::raw(" "));
    }
    let technologies = Paragraph::new(vec![section_title("Key Technologies", palette), Line::from(tags)])
        .wrap(Wrap { trim: false });
    frame.render_widget(technologies, chunks[1]);

    let tree_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[2]);
    frame.render_widget(
        Paragraph::new(section_title("Simulated File Structure", palette)),
        tree_chunks[0],
    );

    let items: Vec<ListItem> = tree
        .visible_rows(&analysis.file_tree)
        .into_iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let line = if row.node.is_directory() {
                let marker = if row.expanded { "▾ " } else { "▸ " };
                Line::from(vec![
                    Span::raw(indent),
                    Span::styled(marker, palette.muted_style()),
                    Span::styled(format!("{}/", row.node.name()), Styles::directory(palette)),
                ])
            } else {
                Line::from(vec![
                    Span::raw(indent),
                    Span::raw("  "),
                    Span::raw(row.node.name().to_string()),
                ])
            };
            ListItem::new(line)
        })
        .collect();

    let mut list = List::new(items);
    if focused {
        list = list.highlight_style(palette.selection_style());
    }
    let mut state = ListState::default().with_selected(Some(tree.cursor));
    frame.render_stateful_widget(list, tree_chunks[1], &mut state);
}

fn section_title<'a>(title: &'a str, palette: &ThemePalette) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(palette.text_secondary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn render_footer(frame: &mut Frame, palette: &ThemePalette, area: Rect) {
    let shortcuts = [
        ("Enter", "Analyze"),
        ("Esc", "Cancel"),
        ("Tab", "Focus"),
        ("F1", "Help"),
        ("F2", "Theme"),
        ("^Q", "Quit"),
    ];

    let spans: Vec<Span> = shortcuts
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!("[{}]", key), Styles::shortcut_key(palette)),
                Span::styled(format!("{} ", desc), Styles::shortcut_desc(palette)),
            ]
        })
        .collect();

    let footer = Paragraph::new(vec![
        Line::from(spans),
        Line::from(Span::styled(DISCLAIMER, palette.muted_style())),
    ])
    .style(palette.status_bar_style())
    .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, palette: &ThemePalette) {
    let area = frame.area();

    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = 18.min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width - popup_width) / 2,
        y: (area.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled("URL form", palette.primary_style())),
        Line::from("  type / Left / Right  - Edit the URL"),
        Line::from("  Home / End           - Jump to start/end"),
        Line::from("  Enter                - Analyze"),
        Line::from("  Esc                  - Cancel a running analysis"),
        Line::from(""),
        Line::from(Span::styled("Results", palette.primary_style())),
        Line::from("  Tab                  - Cycle URL / frontend / backend"),
        Line::from("  Up / Down            - Move in the file tree"),
        Line::from("  Enter / Space        - Collapse or expand a folder"),
        Line::from(""),
        Line::from(Span::styled("General", palette.primary_style())),
        Line::from("  F2                   - Toggle theme"),
        Line::from("  Ctrl+Q / Ctrl+C      - Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::raw(" "),
                    Span::styled("HELP", palette.title_style(true)),
                    Span::raw(" - Press any key to close "),
                ]))
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(palette.border_style(true))
                .padding(Padding::new(2, 2, 1, 1))
                .style(Style::default().bg(palette.bg)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, popup_area);
}

/// Shorten to `max_len` chars, ending in "..." when cut
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("github.com/a/b", 20), "github.com/a/b");
        assert_eq!(truncate_str("github.com/facebook/react", 12), "github.co...");
        assert_eq!(truncate_str("ééééé", 4), "é...");
    }
}
