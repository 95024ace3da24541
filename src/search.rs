//! Filter engine: derives the visible subset of the base collection from
//! the current search query.

use crate::app::AppState;

/// Recompute the filtered view from the base collection and the current
/// search query. Case-insensitive substring match against id, name, email
/// or role; an empty (or all-whitespace) query yields the whole
/// collection. Original order is preserved.
///
/// This is the single filter derivation: live keystrokes in search mode
/// and the explicit apply-on-Enter both funnel through it. Afterwards the
/// page and cursor are re-clamped so a shrinking view never leaves the UI
/// on an out-of-range page.
pub fn apply_search(app: &mut AppState) {
    let q = app.search_query.trim().to_lowercase();
    if q.is_empty() {
        app.members = app.members_all.clone();
    } else {
        app.members = app
            .members_all
            .iter()
            .filter(|m| {
                m.id.to_lowercase().contains(&q)
                    || m.name.to_lowercase().contains(&q)
                    || m.email.to_lowercase().contains(&q)
                    || m.role.to_lowercase().contains(&q)
            })
            .cloned()
            .collect();
    }
    app.clamp_view();
}
