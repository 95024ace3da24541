use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::{AppState, EditField};
use crate::source::Member;

/// Render the member table for the current page: checkbox column, the
/// four record fields, and the actions column (edit/del in view mode,
/// save while editing). Rows in edit mode show their staged buffer
/// values instead of the record values.
pub fn render_members_table(f: &mut Frame, area: Rect, app: &AppState) {
    let slice = app.page_slice();

    let page_all_selected =
        !slice.is_empty() && slice.iter().all(|m| app.selected.contains(&m.id));
    let header_checkbox = if page_all_selected { "[x]" } else { "[ ]" };

    let rows = slice.iter().enumerate().map(|(i, m)| {
        let selected = app.selected.contains(&m.id);
        let mut style = Style::default().fg(app.theme.text);
        if selected {
            style = style.bg(app.theme.status_bg);
        }
        if i == app.cursor {
            style = style
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD);
        }
        build_row(app, m, selected).style(style)
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Percentage(28),
        Constraint::Percentage(36),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let header = Row::new(vec![header_checkbox, "ID", "NAME", "EMAIL", "ROLE", "ACTIONS"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Members")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn build_row<'a>(app: &'a AppState, m: &'a Member, selected: bool) -> Row<'a> {
    let checkbox = if selected { "[x]" } else { "[ ]" };

    if m.is_editing {
        let focused = app.editing.as_deref() == Some(m.id.as_str());
        // Staged values; a buffer always exists for a row in edit mode,
        // but fall back to the record values rather than panic.
        let buf = app.edit_buffers.get(&m.id);
        let (name, email, role) = match buf {
            Some(b) => (b.name.as_str(), b.email.as_str(), b.role.as_str()),
            None => (m.name.as_str(), m.email.as_str(), m.role.as_str()),
        };
        let field = buf.map(|b| b.field).unwrap_or(EditField::Name);

        let cell = |text: &str, this: EditField| {
            let marked = if focused && field == this {
                format!("{text}▌")
            } else {
                text.to_string()
            };
            let mut style = Style::default();
            if focused && field == this {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Cell::from(marked).style(style)
        };

        Row::new(vec![
            Cell::from(checkbox),
            Cell::from(m.id.clone()),
            cell(name, EditField::Name),
            cell(email, EditField::Email),
            cell(role, EditField::Role),
            Cell::from("save"),
        ])
    } else {
        Row::new(vec![
            Cell::from(checkbox),
            Cell::from(m.id.clone()),
            Cell::from(m.name.clone()),
            Cell::from(m.email.clone()),
            Cell::from(m.role.clone()),
            Cell::from("edit del"),
        ])
    }
}
