//! Shared UI components (status bar, toast, modal helpers).
//!
//! Contains small building blocks reused by the table screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;

/// Render the bottom status bar: selection count on the left, pagination
/// control on the right. Boundary buttons are dimmed when disabled.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let selected = app.selected.len();
    let noun = if selected > 0 { "rows" } else { "row" };
    let total = app.members.len();
    let page = app.current_page;
    let pages = app.total_pages();

    let base = Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg);
    let dim = base.fg(app.theme.muted);
    let at_first = page == 1;
    let at_last = page == pages;

    let nav = |label: &'static str, disabled: bool| {
        Span::styled(label, if disabled { dim } else { base })
    };

    let line = Line::from(vec![
        Span::styled(format!("{selected} of {total} {noun} selected."), base),
        Span::styled(format!("   Page {page} of {pages}   "), base),
        nav("« ", at_first),
        nav("‹ ", at_first),
        Span::styled(format!("[{page}] "), base.add_modifier(Modifier::BOLD)),
        nav("› ", at_last),
        nav("»", at_last),
        Span::styled("   (h/l: page, g/G: first/last)", dim),
    ]);

    let p = Paragraph::new(line).style(base);
    f.render_widget(p, area);
}

/// Render the newest notice as a transient toast in the bottom-right
/// corner. Notices expire out of the queue in the event loop.
pub fn render_toast(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(notice) = app.latest_notice() else {
        return;
    };
    let width = (notice.message.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(10);
    let height = 3u16;
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(height + 1),
        width: width.min(area.width),
        height: height.min(area.height),
    };
    let p = Paragraph::new(notice.message.clone())
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.highlight_fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the help modal with the keyboard reference.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(44);
    let height = 18u16.min(area.height.saturating_sub(4)).max(12);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Help", bold)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Move cursor: "),
            Span::styled("Arrow keys / j k", italic),
        ]),
        Line::from(vec![
            Span::raw("Pages: "),
            Span::styled("h/l or Left/Right", italic),
            Span::raw(" prev/next, "),
            Span::styled("g/G", italic),
            Span::raw(" first/last"),
        ]),
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled("/", italic),
            Span::raw(" to start; type to filter; Enter to apply; Esc to clear"),
        ]),
        Line::raw(""),
        Line::from(Span::styled("Selection", bold)),
        Line::from(vec![
            Span::raw("Toggle row checkbox: "),
            Span::styled("Space", italic),
        ]),
        Line::from(vec![
            Span::raw("Select/deselect all on page: "),
            Span::styled("a", italic),
        ]),
        Line::from(vec![
            Span::raw("Clear selection: "),
            Span::styled("c", italic),
            Span::raw("   Delete selected: "),
            Span::styled("D", italic),
        ]),
        Line::raw(""),
        Line::from(Span::styled("Rows", bold)),
        Line::from(vec![
            Span::raw("Edit row: "),
            Span::styled("e", italic),
            Span::raw(" (Tab cycles fields, Enter saves, Esc cancels)"),
        ]),
        Line::from(vec![
            Span::raw("Delete row: "),
            Span::styled("d / Delete", italic),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Close help: "),
            Span::styled("Esc / Enter", italic),
            Span::raw("   Quit: "),
            Span::styled("q", italic),
        ]),
    ];
    if lines.len() as u16 > height.saturating_sub(2) {
        lines.truncate(height.saturating_sub(2) as usize);
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
