//! Application state types and entry glue.
//!
//! Defines the structs and enums that model the table state (base
//! collection, filtered view, pager, selection, row editor, notices),
//! plus helpers to construct defaults and run the event loop
//! (re-exported as `run`).

pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::source::{DEFAULT_MEMBERS_URL, Member, MemberSource};

/// Fixed number of rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// How long a transient notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_millis(2500);

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Edit,
    Help,
}

/// Which field of the edit buffer currently receives keystrokes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditField {
    Name,
    Email,
    Role,
}

impl EditField {
    pub fn next(self) -> Self {
        match self {
            EditField::Name => EditField::Email,
            EditField::Email => EditField::Role,
            EditField::Role => EditField::Name,
        }
    }
}

/// Staged field values for one record mid-edit, keyed by record id in
/// [`AppState::edit_buffers`]. Values start pre-filled from the record;
/// Save commits them, falling back to the record's existing value when a
/// staged value is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditBuffer {
    pub name: String,
    pub email: String,
    pub role: String,
    pub field: EditField,
}

impl EditBuffer {
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            role: member.role.clone(),
            field: EditField::Name,
        }
    }

    pub fn field_mut(&mut self) -> &mut String {
        match self.field {
            EditField::Name => &mut self.name,
            EditField::Email => &mut self.email,
            EditField::Role => &mut self.role,
        }
    }
}

/// Transient success message surfaced as a toast.
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub created: Instant,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    /// Dark default theme.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or the special name "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = if let Some(h) = lower.strip_prefix('#') { h } else { lower.as_str() };
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# admin-table theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // For named colors, emit a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write one with the current default theme and return it.
    /// If present, load from it; on parse errors, return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        let _ = t.write_file(path);
        t
    }
}

/// Startup configuration resolved from the command line.
#[derive(Clone, Debug)]
pub struct Options {
    pub url: String,
    pub data_file: Option<PathBuf>,
    pub theme_path: String,
    pub keybinds_path: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: DEFAULT_MEMBERS_URL.to_string(),
            data_file: None,
            theme_path: "theme.conf".to_string(),
            keybinds_path: "keybinds.conf".to_string(),
        }
    }
}

pub struct AppState {
    pub started_at: Instant,
    /// Base collection: the source of truth, mutated by edit/save/delete.
    pub members_all: Vec<Member>,
    /// Filtered view: derived from `members_all` and `search_query`,
    /// recomputed on every relevant state change.
    pub members: Vec<Member>,
    /// Ids of the rows marked for bulk action.
    pub selected: BTreeSet<String>,
    /// 1-based page number into the filtered view.
    pub current_page: usize,
    /// Cursor row, relative to the current page slice.
    pub cursor: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    /// Id of the row whose edit buffer has keyboard focus.
    pub editing: Option<String>,
    /// Staged edits, scoped per record id.
    pub edit_buffers: HashMap<String, EditBuffer>,
    pub notices: VecDeque<Notice>,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
}

impl AppState {
    /// Create a new `AppState` by fetching the member collection.
    ///
    /// A failed fetch is logged and leaves the table empty; no retry and
    /// no user-visible error.
    pub fn new(opts: &Options) -> Self {
        let source = MemberSource::new(opts.url.clone(), opts.data_file.clone());
        let members_all = match source.load() {
            Ok(members) => {
                tracing::info!(count = members.len(), "loaded member records");
                members
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load member records");
                Vec::new()
            }
        };
        let mut app = Self::with_members(members_all);
        app.theme = Theme::load_or_init(&opts.theme_path);
        app.keymap = keymap::Keymap::load_or_init(&opts.keybinds_path);
        app
    }

    /// Build state around an already-loaded collection (used by `new` and
    /// by tests, which must not touch the network or config files).
    pub fn with_members(members_all: Vec<Member>) -> Self {
        Self {
            started_at: Instant::now(),
            members: members_all.clone(),
            members_all,
            selected: BTreeSet::new(),
            current_page: 1,
            cursor: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            editing: None,
            edit_buffers: HashMap::new(),
            notices: VecDeque::new(),
            theme: Theme::mocha(),
            keymap: keymap::Keymap::new_defaults(),
        }
    }

    /// Total page count over the filtered view. An empty view still counts
    /// as one page so the footer renders a stable "Page 1 of 1".
    pub fn total_pages(&self) -> usize {
        if self.members.is_empty() {
            1
        } else {
            self.members.len().div_ceil(PAGE_SIZE)
        }
    }

    /// The window of the filtered view shown on the current page.
    pub fn page_slice(&self) -> &[Member] {
        let start = ((self.current_page - 1) * PAGE_SIZE).min(self.members.len());
        let end = (start + PAGE_SIZE).min(self.members.len());
        &self.members[start..end]
    }

    /// Jump to a page, clamped to `[1, total_pages]`; clamps the cursor
    /// into the new page slice.
    pub fn goto_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
        self.clamp_cursor();
    }

    pub fn first_page(&mut self) {
        self.goto_page(1);
    }

    pub fn prev_page(&mut self) {
        self.goto_page(self.current_page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.current_page + 1);
    }

    pub fn last_page(&mut self) {
        self.goto_page(self.total_pages());
    }

    /// Re-clamp page and cursor after any mutation that may have shrunk
    /// the filtered view.
    pub fn clamp_view(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages());
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.page_slice().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// The record under the cursor, if any.
    pub fn cursor_member(&self) -> Option<&Member> {
        self.page_slice().get(self.cursor)
    }

    pub fn push_notice(&mut self, message: impl Into<String>) {
        self.notices.push_back(Notice {
            message: message.into(),
            created: Instant::now(),
        });
    }

    /// Drop notices older than the display window.
    pub fn prune_notices(&mut self) {
        let now = Instant::now();
        self.notices
            .retain(|n| now.duration_since(n.created) < NOTICE_TTL);
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.back()
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
