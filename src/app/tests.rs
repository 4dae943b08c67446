use super::*;
use std::path::Path;

#[test]
fn cursor_wraps_both_ways() {
    let mut app = App::new(Path::new("/music"));
    app.prev(3);
    assert_eq!(app.cursor, 2);
    app.next(3);
    assert_eq!(app.cursor, 0);
    app.next(3);
    assert_eq!(app.cursor, 1);
}

#[test]
fn cursor_stays_at_zero_on_empty_list() {
    let mut app = App::default();
    app.next(0);
    assert_eq!(app.cursor, 0);
    app.prev(0);
    assert_eq!(app.cursor, 0);
    app.bottom(0);
    assert_eq!(app.cursor, 0);
}

#[test]
fn top_and_bottom_jump_to_the_ends() {
    let mut app = App::default();
    app.bottom(5);
    assert_eq!(app.cursor, 4);
    app.top();
    assert_eq!(app.cursor, 0);
}

#[test]
fn clamp_pulls_cursor_back_after_list_shrinks() {
    let mut app = App::default();
    app.cursor = 7;
    app.clamp(3);
    assert_eq!(app.cursor, 2);
    app.clamp(10);
    assert_eq!(app.cursor, 2);
}

#[test]
fn follow_ignores_missing_index() {
    let mut app = App::default();
    app.cursor = 3;
    app.follow(None);
    assert_eq!(app.cursor, 3);
    app.follow(Some(1));
    assert_eq!(app.cursor, 1);
}

#[test]
fn metadata_window_toggles_and_dir_is_recorded() {
    let mut app = App::new(Path::new("/a"));
    assert_eq!(app.current_dir.as_deref(), Some(Path::new("/a")));
    app.toggle_metadata_window();
    assert!(app.metadata_window);
    app.toggle_metadata_window();
    assert!(!app.metadata_window);
}
