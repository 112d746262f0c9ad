use super::*;
use crate::config::ConcatSettings;
use crate::library::{Icon, MediaItem, SortKey, SortOrder};
use crate::payload::PayloadError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

fn m(name: &str, size: u64) -> MediaItem {
    MediaItem {
        path: PathBuf::from("/clips").join(name),
        name: name.into(),
        modified: SystemTime::UNIX_EPOCH,
        size,
        is_container: false,
        duration: Some(Duration::from_secs(size)),
        icon: Icon::Movie,
    }
}

fn app(names: &[&str]) -> App {
    App::new(
        names
            .iter()
            .enumerate()
            .map(|(i, n)| m(n, i as u64 + 1))
            .collect(),
    )
}

fn names(app: &App) -> Vec<&str> {
    app.items.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn cursor_wraps_like_a_list() {
    let mut app = app(&["a", "b", "c"]);
    app.prev();
    assert_eq!(app.cursor, 2);
    app.next();
    assert_eq!(app.cursor, 0);
    app.last();
    assert_eq!(app.cursor, 2);
}

#[test]
fn effective_selection_falls_back_to_cursor() {
    let mut app = app(&["a", "b", "c"]);
    app.cursor = 1;
    assert_eq!(app.effective_selection(), BTreeSet::from([1]));

    app.toggle_selected();
    app.cursor = 2;
    app.toggle_selected();
    assert_eq!(app.effective_selection(), BTreeSet::from([1, 2]));

    app.toggle_selected();
    assert_eq!(app.effective_selection(), BTreeSet::from([1]));

    let empty = App::new(Vec::new());
    assert!(empty.effective_selection().is_empty());
}

#[test]
fn remove_selected_keeps_the_rest_in_order() {
    let mut app = app(&["a", "b", "c", "d"]);
    app.selection = BTreeSet::from([0, 2]);
    app.cursor = 3;
    assert_eq!(app.remove_selected(), 2);
    assert_eq!(names(&app), vec!["b", "d"]);
    assert!(app.selection.is_empty());
    assert_eq!(app.cursor, 1);
}

#[test]
fn drag_and_drop_moves_block_and_reselects_it() {
    let mut app = app(&["a", "b", "c", "d", "e"]);
    app.selection = BTreeSet::from([1, 3]);
    assert_eq!(app.begin_drag(), 2);
    assert!(app.is_dragging());

    // The gap after the last row is reachable while dragging.
    app.last();
    assert_eq!(app.cursor, 5);

    let range = app.drop_at(4).unwrap();
    assert_eq!(range, 2..4);
    assert_eq!(names(&app), vec!["a", "c", "b", "d", "e"]);
    assert_eq!(app.selection, BTreeSet::from([2, 3]));
    assert_eq!(app.cursor, 2);
    assert!(!app.is_dragging());
}

#[test]
fn drop_past_the_last_row_appends_block() {
    let mut app = app(&["a", "b", "c"]);
    app.cursor = 0;
    app.begin_drag();
    app.last();
    let range = app.drop_at_cursor().unwrap();
    assert_eq!(range, 2..3);
    assert_eq!(names(&app), vec!["b", "c", "a"]);
}

#[test]
fn garbled_payload_is_rejected_without_touching_the_list() {
    let mut app = app(&["a", "b", "c"]);
    let err = app.drop_payload(b"not a payload", 0).unwrap_err();
    assert!(matches!(err, PayloadError::WrongFlavor));
    assert_eq!(names(&app), vec!["a", "b", "c"]);

    assert!(matches!(app.drop_at(0), Err(PayloadError::NoDrag)));
}

#[test]
fn cancel_drag_pulls_cursor_back_onto_a_row() {
    let mut app = app(&["a", "b"]);
    app.begin_drag();
    app.last();
    assert_eq!(app.cursor, 2);
    app.cancel_drag();
    assert!(!app.is_dragging());
    assert_eq!(app.cursor, 1);
    assert_eq!(names(&app), vec!["a", "b"]);
}

#[test]
fn sort_by_same_key_flips_direction_and_cursor_follows_item() {
    let mut app = App::new(vec![m("b", 20), m("c", 30), m("a", 10)]);
    app.cursor = 1; // "c"
    app.selection = BTreeSet::from([2]); // "a"

    assert_eq!(app.sort_by(SortKey::Name), (SortKey::Name, SortOrder::Ascending));
    assert_eq!(names(&app), vec!["a", "b", "c"]);
    assert_eq!(app.cursor, 2);
    assert_eq!(app.selection, BTreeSet::from([0]));

    assert_eq!(app.sort_by(SortKey::Name), (SortKey::Name, SortOrder::Descending));
    assert_eq!(names(&app), vec!["c", "b", "a"]);
    assert_eq!(app.cursor, 0);

    assert_eq!(app.sort_by(SortKey::Size), (SortKey::Size, SortOrder::Ascending));
    assert_eq!(names(&app), vec!["a", "b", "c"]);
}

#[test]
fn shift_selection_nudges_single_rows_and_blocks() {
    let mut app = app(&["a", "b", "c", "d"]);
    app.cursor = 1;
    assert_eq!(app.shift_selection(true), Some(2..3));
    assert_eq!(names(&app), vec!["a", "c", "b", "d"]);
    assert_eq!(app.cursor, 2);

    app.selection = BTreeSet::from([2, 3]);
    assert_eq!(app.shift_selection(true), None);
    assert_eq!(app.shift_selection(false), Some(1..3));
    assert_eq!(names(&app), vec!["a", "b", "d", "c"]);
    assert_eq!(app.selection, BTreeSet::from([1, 2]));

    app.selection = BTreeSet::from([0]);
    assert_eq!(app.shift_selection(false), None);
}

#[test]
fn totals_cover_list_and_marked_rows() {
    let mut app = app(&["a", "b", "c"]);
    assert_eq!(app.totals().size, 6);
    assert_eq!(app.totals().duration, Duration::from_secs(6));
    assert_eq!(app.selection_totals().count, 0);

    app.selection = BTreeSet::from([0, 2]);
    let t = app.selection_totals();
    assert_eq!(t.count, 2);
    assert_eq!(t.size, 4);
}

#[test]
fn preview_paths_are_in_list_order() {
    let mut app = app(&["a", "b", "c"]);
    app.selection = BTreeSet::from([2, 0]);
    assert_eq!(
        app.preview_paths(),
        vec![PathBuf::from("/clips/a"), PathBuf::from("/clips/c")]
    );
}

#[test]
fn concat_plan_uses_current_order() {
    let mut app = App::new(vec![m("x.mov", 1), m("y.mov", 2)]);
    app.selection = BTreeSet::from([1]);
    app.begin_drag();
    app.drop_at(0).unwrap();

    let plan = app
        .concat_plan(Path::new("/out/z"), &ConcatSettings::default())
        .unwrap();
    assert_eq!(plan.manifest(), "file '/clips/y.mov'\nfile '/clips/x.mov'\n");
    assert_eq!(plan.output(), Path::new("/out/z.mov"));

    assert!(
        App::new(Vec::new())
            .concat_plan(Path::new("/out/z"), &ConcatSettings::default())
            .is_err()
    );
}

#[test]
fn prompt_collects_and_hands_back_input() {
    let mut app = app(&["a"]);
    app.push_prompt_str("ignored");
    assert!(app.prompt.is_none());

    app.open_prompt(PromptKind::SaveAs);
    app.push_prompt_str("/out/zz");
    app.pop_prompt_char();
    let p = app.take_prompt().unwrap();
    assert_eq!(p.kind, PromptKind::SaveAs);
    assert_eq!(p.input, "/out/z");
    assert!(app.prompt.is_none());
}
