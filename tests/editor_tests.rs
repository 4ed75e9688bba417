//! # Editor Tests
//!
//! End-to-end checks of the editor through the public API: history
//! behaviour, layout files, grid snapping, seat numbering, the storage slot
//! and shortcut lifetimes.

use pretty_assertions::assert_eq;

use seatplan::config::EditorConfig;
use seatplan::editor::{EditorMode, IdGenerator, LayoutEditor, MountedEditor};
use seatplan::layout::{LayoutElement, Point, Position, Size, Zone};
use seatplan::session::Session;
use seatplan::shortcuts::{KeyCombo, Keymap, ShortcutRegistry};
use seatplan::storage::FileStore;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn editor() -> LayoutEditor {
    LayoutEditor::with_ids(EditorConfig::default(), IdGenerator::with_fixed_time(1_700_000_000_000))
        .unwrap()
}

fn editor_with_capacity(capacity: usize) -> LayoutEditor {
    let config = EditorConfig {
        history_capacity: capacity,
        ..EditorConfig::default()
    };
    LayoutEditor::new(config).unwrap()
}

fn seat_numbers(editor: &LayoutEditor) -> Vec<&str> {
    editor
        .elements()
        .iter()
        .filter_map(|e| e.as_seat().map(|s| s.number.as_str()))
        .collect()
}

/// Elements with ids blanked, for comparing layouts built by different editors.
fn without_ids(elements: &[LayoutElement]) -> Vec<LayoutElement> {
    elements
        .iter()
        .cloned()
        .map(|mut e| {
            e.id.clear();
            e
        })
        .collect()
}

/// Five different committing operations.
fn make_edits(editor: &mut LayoutEditor) {
    let seat = editor.add_seat(100, 100).id.clone();
    let area = editor.add_area("reception").unwrap().id.clone();
    editor.add_amenity("printer").unwrap();
    editor.select(Some(&seat));
    editor.copy();
    editor.paste();
    editor.resize_area(&area, Size::new(300, 200)).unwrap();
}

// ============================================================================
// HISTORY
// ============================================================================

#[test]
fn test_undo_all_edits_restores_initial_layout() {
    let mut ed = editor();
    ed.add_seat(0, 0);
    let initial = ed.elements().to_vec();

    make_edits(&mut ed);
    assert_eq!(ed.elements().len(), 5);

    for _ in 0..5 {
        assert!(ed.undo());
    }
    assert_eq!(ed.elements(), initial.as_slice());
}

#[test]
fn test_redo_restores_state_before_undo() {
    let mut ed = editor();
    make_edits(&mut ed);
    let before = ed.elements().to_vec();

    ed.undo();
    ed.undo();
    assert_ne!(ed.elements(), before.as_slice());
    ed.redo();
    ed.redo();
    assert_eq!(ed.elements(), before.as_slice());
    assert!(!ed.can_redo());
}

#[test]
fn test_commit_after_undo_discards_redo() {
    let mut ed = editor();
    ed.add_seat(0, 0);
    ed.add_seat(40, 0);
    ed.undo();
    assert!(ed.can_redo());

    ed.add_seat(200, 200);
    assert!(!ed.can_redo());
    let after = ed.elements().to_vec();
    assert!(!ed.redo());
    assert_eq!(ed.elements(), after.as_slice());
}

#[test]
fn test_history_capacity_evicts_oldest() {
    let mut ed = editor_with_capacity(5);
    for i in 0..10 {
        ed.add_seat(i * 40, 0);
        assert!(ed.history().len() <= 5);
    }
    assert_eq!(ed.history().len(), 5);

    let mut undos = 0;
    while ed.undo() {
        undos += 1;
    }
    assert_eq!(undos, 4);
    // The snapshot with no seats was evicted long ago.
    assert_eq!(ed.elements().len(), 6);
}

// ============================================================================
// LAYOUT FILES
// ============================================================================

#[test]
fn test_export_then_import_is_identity() {
    let mut ed = editor();
    ed.generate_smart_layout();
    ed.add_amenity("water-cooler").unwrap();
    ed.set_name("North Hall");
    let exported = ed.export_layout().unwrap();
    assert_eq!(exported.file_name, "North_Hall_layout.json");

    let mut other = editor();
    other.import_layout(&exported.contents).unwrap();
    assert_eq!(other.elements(), ed.elements());
    assert_eq!(other.name(), "North Hall");
}

#[test]
fn test_smart_layout_is_deterministic_apart_from_ids() {
    let mut a = editor();
    let mut b = LayoutEditor::new(EditorConfig::default()).unwrap();
    b.add_seat(500, 500);
    a.generate_smart_layout();
    b.generate_smart_layout();

    assert_eq!(without_ids(a.elements()), without_ids(b.elements()));

    let stats = a.stats();
    assert_eq!(stats.total_seats, 48);
    assert_eq!(stats.areas, 3);
    assert_eq!(stats.seats_by_zone.get(&Zone::Premium), Some(&16));
}

#[test]
fn test_import_rejects_garbage() {
    let mut ed = editor();
    ed.add_seat(0, 0);
    let before = ed.elements().to_vec();
    assert!(ed.import_layout("not json").is_err());
    assert!(ed.import_layout("{\"elements\": 3}").is_err());
    assert_eq!(ed.elements(), before.as_slice());
    assert_eq!(ed.history().len(), 2);
}

// ============================================================================
// PLACEMENT AND DRAG
// ============================================================================

#[test]
fn test_drag_release_is_grid_aligned() {
    let mut ed = editor();
    let id = ed.add_seat(100, 100).id.clone();
    ed.set_mode(EditorMode::Drag);

    let targets = [
        (137.3, 59.9),
        (411.0, 12.5),
        (9.99, 250.01),
        (-75.0, 33.0),
        (1000.5, 700.4),
    ];
    for (x, y) in targets {
        let start = ed.element(&id).unwrap().position;
        let grab = Point::new(f64::from(start.x) + 7.0, f64::from(start.y) + 13.0);
        assert!(ed.begin_drag(&id, grab));
        ed.update_drag(Point::new(x, y));
        ed.end_drag();

        let Position { x, y } = ed.element(&id).unwrap().position;
        assert_eq!(x % 20, 0, "x = {}", x);
        assert_eq!(y % 20, 0, "y = {}", y);
        assert!(x >= 0 && y >= 0);
    }
}

#[test]
fn test_seat_numbers_follow_seat_count() {
    let mut ed = editor();
    let s1 = ed.add_seat(100, 100).clone();
    assert_eq!(s1.position, Position::new(100, 100));
    assert_eq!(s1.as_seat().unwrap().zone, Zone::Reading);
    ed.add_seat(140, 100);
    assert_eq!(seat_numbers(&ed), ["S1", "S2"]);

    ed.select(Some(&s1.id));
    ed.delete_selected();
    ed.add_seat(100, 100);
    assert_eq!(seat_numbers(&ed), ["S2", "S2"]);
}

#[test]
fn test_paste_without_copy_changes_nothing() {
    let mut ed = editor();
    ed.add_seat(0, 0);
    let before = ed.elements().to_vec();
    assert!(!ed.copy());
    assert!(ed.paste().is_none());
    assert_eq!(ed.elements(), before.as_slice());
    assert_eq!(ed.history().len(), 2);
}

// ============================================================================
// STORAGE AND SESSIONS
// ============================================================================

#[test]
fn test_file_store_round_trip_between_editors() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();

    let mut ed = editor();
    ed.add_area("entrance").unwrap();
    ed.add_seat(300, 300);
    ed.save_layout(&mut store).unwrap();

    let mut other = editor();
    assert!(other.load_layout(&store).unwrap());
    assert_eq!(other.elements(), ed.elements());
    assert!(other.undo());
    assert!(other.elements().is_empty());
}

#[test]
fn test_session_script_against_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let registry = ShortcutRegistry::new();
    let mut session = Session::new(editor(), &registry, Box::new(store), Vec::new());

    let script = "\
# build a small room
add-seat 100 100
add-seat 140 100
add-area washroom
save
clear yes
key ctrl+z
stats
";
    assert_eq!(session.run_script(script.as_bytes()).unwrap(), 7);
    assert_eq!(registry.active(), 1);

    let (ed, out) = session.finish();
    assert_eq!(registry.active(), 0);
    assert_eq!(ed.elements().len(), 3);

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("[success] Layout saved"));
    assert!(out.contains("[info] Undo: Clear canvas"));
    assert!(out.contains("seats: 2  areas: 1  amenities: 0"));
    assert!(dir.path().join("seatplan.layout.json").exists());
}

// ============================================================================
// SHORTCUTS
// ============================================================================

#[test]
fn test_dropping_subscription_unbinds_keys() {
    let registry = ShortcutRegistry::new();
    let undo = KeyCombo::ctrl('z');

    let subscription = registry.subscribe(Keymap::editor_default());
    assert!(registry.dispatch(&undo).is_some());
    drop(subscription);
    assert!(registry.dispatch(&undo).is_none());

    let mut mounted = MountedEditor::mount(editor(), &registry);
    mounted.editor_mut().add_seat(0, 0);
    let ed = mounted.unmount();
    assert!(registry.dispatch(&undo).is_none());
    assert_eq!(ed.elements().len(), 1);
}
