pub mod components;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_header(f, root[0], app);
    table::render_members_table(f, root[1], app);
    components::render_status_bar(f, root[2], app);

    components::render_toast(f, f.area(), app);

    if app.input_mode == InputMode::Help {
        components::render_help_modal(f, f.area(), app);
    }
}

/// Top bar: title, search box, and the bulk-action bar. The bulk actions
/// are dimmed when nothing is selected but stay functional.
fn render_header(f: &mut Frame, area: ratatui::layout::Rect, app: &AppState) {
    let search_marker = match app.input_mode {
        InputMode::Search => "▌",
        _ => "",
    };
    let bulk_style = if app.selected.is_empty() {
        Style::default().fg(app.theme.muted)
    } else {
        Style::default().fg(app.theme.highlight_fg)
    };

    let line = Line::from(vec![
        Span::styled("Admin Dashboard", Style::default().fg(app.theme.title)),
        Span::raw(format!("  Search: {}{}", app.search_query, search_marker)),
        Span::raw("  │  "),
        Span::styled("Delete Selected (D)", bulk_style),
        Span::raw("  "),
        Span::styled("Clear Selection (c)", bulk_style),
        Span::raw("  │  /: search  ?: help  q: quit"),
    ]);

    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title("admin-table")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}
