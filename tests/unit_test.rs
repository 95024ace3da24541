// Unit tests for admin-table
// These tests work with the public API without modifying the main codebase

#[cfg(test)]
mod source_tests {
    use admin_table::source::{Member, MemberSource, parse_members};

    #[test]
    fn test_member_struct() {
        let member = Member {
            id: "1".to_string(),
            name: "Aaron Miles".to_string(),
            email: "aaron@mailinator.com".to_string(),
            role: "member".to_string(),
            is_editing: false,
        };

        assert_eq!(member.id, "1");
        assert_eq!(member.name, "Aaron Miles");
        assert!(!member.is_editing);
    }

    #[test]
    fn test_parse_members_array() {
        let json = r#"[
            {"id":"1","name":"A","email":"a@x.com","role":"admin"},
            {"id":"2","name":"B","email":"b@x.com","role":"member"}
        ]"#;
        let members = parse_members(json).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].role, "admin");
        // The edit flag is transient UI state, never part of the source data
        assert!(members.iter().all(|m| !m.is_editing));
    }

    #[test]
    fn test_parse_members_bad_json_errors() {
        assert!(parse_members("not json").is_err());
        assert!(parse_members(r#"{"id":"1"}"#).is_err());
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        use std::time::{SystemTime, UNIX_EPOCH};
        let mut path = std::env::temp_dir();
        let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        path.push(format!("admtbl_unit_{}_{}.json", std::process::id(), nonce));

        std::fs::write(
            &path,
            r#"[{"id":"42","name":"X","email":"x@x.com","role":"member"}]"#,
        )
        .unwrap();

        let source = MemberSource::new("http://unused.invalid/", Some(path.clone()));
        let members = source.load().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "42");
    }
}

#[cfg(test)]
mod search_tests {
    use admin_table::app::AppState;
    use admin_table::search::apply_search;
    use admin_table::source::Member;

    fn create_test_member(id: &str, name: &str, email: &str, role: &str) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            is_editing: false,
        }
    }

    fn create_test_app(members: Vec<Member>) -> AppState {
        AppState::with_members(members)
    }

    #[test]
    fn test_search_empty_query_resets() {
        let mut app = create_test_app(vec![
            create_test_member("1", "Alice", "alice@x.com", "admin"),
            create_test_member("2", "Bob", "bob@x.com", "member"),
        ]);
        app.members = vec![app.members_all[0].clone()]; // Filtered state
        app.search_query = String::new();

        apply_search(&mut app);

        assert_eq!(app.members.len(), 2); // Reset to all members
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut app = create_test_app(vec![
            create_test_member("1", "Alice", "alice@x.com", "admin"),
            create_test_member("2", "bob", "bob@x.com", "member"),
        ]);

        app.search_query = "aLiCe".to_string();
        apply_search(&mut app);
        assert_eq!(app.members.len(), 1);
        assert_eq!(app.members[0].name, "Alice");

        app.search_query = "BOB".to_string();
        apply_search(&mut app);
        assert_eq!(app.members.len(), 1);
        assert_eq!(app.members[0].name, "bob");
    }

    #[test]
    fn test_search_by_id_then_clear() {
        let mut app = create_test_app(vec![
            create_test_member("1", "One", "one@x.com", "member"),
            create_test_member("2", "Two", "two@x.com", "member"),
        ]);

        app.search_query = "1".to_string();
        apply_search(&mut app);
        assert_eq!(app.members.len(), 1);
        assert_eq!(app.members[0].id, "1");

        app.search_query.clear();
        apply_search(&mut app);
        assert_eq!(app.members.len(), 2);
    }

    #[test]
    fn test_search_idempotent() {
        let mut app = create_test_app(vec![
            create_test_member("1", "Alpha", "a@x.com", "member"),
            create_test_member("2", "Beta", "b@x.com", "admin"),
            create_test_member("3", "Alphabet", "c@x.com", "member"),
        ]);
        app.search_query = "alph".to_string();
        apply_search(&mut app);
        let once: Vec<String> = app.members.iter().map(|m| m.id.clone()).collect();
        apply_search(&mut app);
        let twice: Vec<String> = app.members.iter().map(|m| m.id.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_search_special_characters_no_panic() {
        let mut app = create_test_app(vec![
            create_test_member("1", "Alice", "alice@x.com", "admin"),
            create_test_member("2", "Bob", "bob@x.com", "member"),
        ]);

        // Special characters are treated literally and must not panic
        app.search_query = "[".to_string();
        apply_search(&mut app);
        assert_eq!(app.members.len(), 0);

        app.search_query = "@x.com".to_string();
        apply_search(&mut app);
        assert_eq!(app.members.len(), 2);
    }

    #[test]
    fn test_search_performance_large_dataset() {
        use std::time::Instant;

        let members: Vec<Member> = (0..10000)
            .map(|i| {
                create_test_member(
                    &i.to_string(),
                    &format!("member{}", i),
                    &format!("m{}@x.com", i),
                    "member",
                )
            })
            .collect();
        let mut app = create_test_app(members);
        app.search_query = "member5000".to_string();

        let start = Instant::now();
        apply_search(&mut app);
        let duration = start.elapsed();

        assert_eq!(app.members.len(), 1);
        assert_eq!(app.members[0].name, "member5000");
        // Performance assertion: should complete within 100ms
        assert!(
            duration.as_millis() < 100,
            "Search took too long: {:?}",
            duration
        );
    }
}

#[cfg(test)]
mod pager_tests {
    use admin_table::app::{AppState, PAGE_SIZE};
    use admin_table::source::Member;

    fn mk_members(n: usize) -> Vec<Member> {
        (1..=n)
            .map(|i| Member {
                id: i.to_string(),
                name: format!("M{i}"),
                email: format!("m{i}@x.com"),
                role: "member".to_string(),
                is_editing: false,
            })
            .collect()
    }

    #[test]
    fn test_page_size_is_ten() {
        assert_eq!(PAGE_SIZE, 10);
    }

    #[test]
    fn test_slices_cover_collection_without_overlap() {
        let mut app = AppState::with_members(mk_members(37));
        let total = app.total_pages();
        assert_eq!(total, 4);

        let mut all_ids = Vec::new();
        let mut sum = 0;
        for page in 1..=total {
            app.goto_page(page);
            sum += app.page_slice().len();
            all_ids.extend(app.page_slice().iter().map(|m| m.id.clone()));
        }
        assert_eq!(sum, 37);
        let unique: std::collections::BTreeSet<_> = all_ids.iter().collect();
        assert_eq!(unique.len(), 37, "page slices must not overlap");
    }

    #[test]
    fn test_boundary_buttons_clamp() {
        let mut app = AppState::with_members(mk_members(15));
        app.prev_page();
        app.first_page();
        assert_eq!(app.current_page, 1);
        app.next_page();
        assert_eq!(app.current_page, 2);
        app.next_page();
        assert_eq!(app.current_page, 2);
        app.goto_page(0);
        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn test_empty_collection_stable_page() {
        let mut app = AppState::with_members(vec![]);
        assert_eq!(app.total_pages(), 1);
        app.last_page();
        app.next_page();
        app.prev_page();
        assert_eq!(app.current_page, 1);
        assert!(app.page_slice().is_empty());
    }
}

#[cfg(test)]
mod error_handling_tests {
    use admin_table::error::{Context, SimpleError, simple_error};

    #[test]
    fn test_context_error_chaining() {
        let base_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let result: Result<(), std::io::Error> = Err(base_error);

        let with_context = result.with_ctx(|| "Failed to read members file".to_string());

        assert!(with_context.is_err());
        let err = with_context.unwrap_err();
        let err_string = err.to_string();
        assert!(err_string.contains("Failed to read members file"));
        assert!(err_string.contains("file not found"));
    }

    #[test]
    fn test_context_preserves_source() {
        let base_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let result: Result<(), std::io::Error> = Err(base_error);

        let err = result.with_ctx(|| "Cannot open file".to_string()).unwrap_err();
        let source = err.source();
        assert!(source.is_some());
        assert!(source.unwrap().to_string().contains("access denied"));
    }

    #[test]
    fn test_simple_error() {
        let err = simple_error("Custom error message");
        assert_eq!(err.to_string(), "Custom error message");

        let err2 = SimpleError::new("Another error");
        assert_eq!(err2.to_string(), "Another error");
    }
}

#[cfg(test)]
mod app_state_tests {
    use admin_table::app::{AppState, EditField, InputMode};

    #[test]
    fn test_with_members_defaults() {
        let app = AppState::with_members(vec![]);
        assert_eq!(app.current_page, 1);
        assert_eq!(app.cursor, 0);
        assert!(app.selected.is_empty());
        assert!(app.edit_buffers.is_empty());
        assert!(app.editing.is_none());
        assert!(matches!(app.input_mode, InputMode::Normal));
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_input_mode_enum() {
        assert!(matches!(InputMode::Normal, InputMode::Normal));
        assert!(matches!(InputMode::Search, InputMode::Search));
        assert!(matches!(InputMode::Edit, InputMode::Edit));
        assert!(matches!(InputMode::Help, InputMode::Help));
    }

    #[test]
    fn test_edit_field_cycle_covers_all_fields() {
        let mut field = EditField::Name;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(field);
            field = field.next();
        }
        assert_eq!(field, EditField::Name);
        assert!(seen.contains(&EditField::Email));
        assert!(seen.contains(&EditField::Role));
    }

    #[test]
    fn test_theme_creation() {
        use admin_table::app::Theme;
        let theme = Theme::dark();
        assert_eq!(theme.text, ratatui::style::Color::Gray);
    }
}

#[cfg(test)]
mod render_tests {
    use admin_table::app::{AppState, InputMode};
    use admin_table::source::Member;
    use admin_table::ui::render;
    use ratatui::{Terminal, backend::TestBackend};

    fn mk_members(n: usize) -> Vec<Member> {
        (1..=n)
            .map(|i| Member {
                id: i.to_string(),
                name: format!("Member {i}"),
                email: format!("m{i}@x.com"),
                role: "member".to_string(),
                is_editing: false,
            })
            .collect()
    }

    #[test]
    fn test_ui_render_smoke() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("create terminal");
        let mut app = AppState::with_members(mk_members(23));
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render frame");
    }

    #[test]
    fn test_ui_render_with_empty_data() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("create terminal");
        let mut app = AppState::with_members(vec![]);
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render frame with empty data");
    }

    #[test]
    fn test_ui_render_editing_row_and_toast() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("create terminal");
        let mut app = AppState::with_members(mk_members(3));
        admin_table::app::update::begin_edit(&mut app);
        app.push_notice("Updates saved successfully!");
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render frame with editing row");
    }

    #[test]
    fn test_ui_render_help_modal() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("create terminal");
        let mut app = AppState::with_members(mk_members(1));
        app.input_mode = InputMode::Help;
        terminal
            .draw(|f| {
                render(f, &mut app);
            })
            .expect("render frame with help modal");
    }
}
