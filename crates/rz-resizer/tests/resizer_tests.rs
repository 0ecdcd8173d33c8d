//! Unit tests for the Resizer API (no browser required).
//!
//! These tests drive the widget against the in-memory document and verify
//! the elements, styles and state it produces.

use rz_core::math::Vec2;
use rz_dom::{Document, PointerEvent, StyleSink};
use rz_resizer::{
    ConstructionError, ContainerRef, GHOST_Z_INDEX, HANDLE_ATTRIBUTE, Resizer, ResizerOptions,
    registry,
};
use rz_test_utils::{DomCall, MemoryDocument, NodeId, create_container};

const CONTAINER_WIDTH: f32 = 300.0;

fn setup() -> (MemoryDocument, Resizer<MemoryDocument>) {
    let doc = MemoryDocument::new();
    create_container(&doc, CONTAINER_WIDTH);
    let rz = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();
    (doc, rz)
}

fn pointer() -> PointerEvent {
    PointerEvent::down(Vec2::new(10.0, 0.0), Vec2::new(2.0, 0.0))
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_new_without_container_fails() {
    let doc = MemoryDocument::new();
    create_container(&doc, CONTAINER_WIDTH);

    let err = Resizer::new(&doc, ContainerRef::Unset, ResizerOptions::default()).unwrap_err();
    assert_eq!(err, ConstructionError::MissingContainer);

    let err = Resizer::new(&doc, None::<&str>, ResizerOptions::default()).unwrap_err();
    assert_eq!(err, ConstructionError::MissingContainer);

    let err = Resizer::new(&doc, "  ", ResizerOptions::default()).unwrap_err();
    assert_eq!(err, ConstructionError::MissingContainer);
}

#[test]
fn test_new_with_unknown_selector_fails() {
    let doc = MemoryDocument::new();
    create_container(&doc, CONTAINER_WIDTH);
    doc.clear_calls();

    let err = Resizer::new(&doc, "unknown", ResizerOptions::default()).unwrap_err();
    assert_eq!(err, ConstructionError::ContainerNotFound("unknown".to_string()));

    // Nothing was created or attached.
    assert!(doc.calls().is_empty());
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn test_new_with_invalid_selector_fails() {
    let doc = MemoryDocument::new();
    let err = Resizer::new(&doc, "div > .item", ResizerOptions::default()).unwrap_err();
    assert!(matches!(err, ConstructionError::Dom(_)));
}

#[test]
fn test_new_without_second_child_fails() {
    let doc = MemoryDocument::new();
    let lonely = doc.create_element("div").unwrap();
    let only_child = doc.create_element("div").unwrap();
    doc.append_child(&lonely, &only_child).unwrap();
    doc.append_child(&doc.body(), &lonely).unwrap();
    doc.clear_calls();

    let err = Resizer::with_element(&doc, lonely, ResizerOptions::default()).unwrap_err();
    assert_eq!(err, ConstructionError::NoTarget);
    assert!(doc.calls().is_empty());
    assert_eq!(doc.children(&lonely), vec![only_child]);
}

#[test]
fn test_new_with_selector() {
    let doc = MemoryDocument::new();
    let fixture = create_container(&doc, CONTAINER_WIDTH);

    let rz = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();
    assert_eq!(rz.container(), fixture.container);
}

#[test]
fn test_new_with_element() {
    let doc = MemoryDocument::new();
    let fixture = create_container(&doc, CONTAINER_WIDTH);

    let rz = Resizer::with_element(&doc, fixture.container, ResizerOptions::default()).unwrap();
    assert_eq!(rz.container(), fixture.container);
}

#[test]
fn test_new_lays_out_handle_and_ghost() {
    let doc = MemoryDocument::new();
    let fixture = create_container(&doc, CONTAINER_WIDTH);
    let [first, second] = fixture.items;

    let rz = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();

    assert_eq!(
        doc.children(&fixture.container),
        vec![first, rz.handle(), second, rz.ghost()]
    );
    assert_eq!(rz.target(), second);
    assert_eq!(doc.style(&second, "flex").as_deref(), Some("0 0 auto"));
    assert_eq!(
        doc.style(&fixture.container, "position").as_deref(),
        Some("relative")
    );
    assert_eq!(doc.style(&rz.handle(), "width").as_deref(), Some("8px"));
    assert_eq!(doc.style(&rz.ghost(), "width").as_deref(), Some("8px"));
    assert_eq!(doc.listener_count(), 3);
}

#[test]
fn test_new_replaces_existing_resizer() {
    let doc = MemoryDocument::new();
    let fixture = create_container(&doc, CONTAINER_WIDTH);

    let first = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();
    let second = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();

    assert!(first.is_removed());
    assert!(!second.is_removed());
    assert_eq!(Resizer::lookup(&doc, &fixture.container), Some(second.id()));
    assert_eq!(doc.listener_count(), 3);
    assert_eq!(registry::active_count(), 1);

    // Only the new handle and ghost remain, and the target is unchanged.
    assert_eq!(doc.children(&fixture.container).len(), 4);
    assert_eq!(second.target(), fixture.items[1]);
}

#[test]
fn test_dropped_handle_stays_active_until_removed() {
    let doc = MemoryDocument::new();
    let fixture = create_container(&doc, CONTAINER_WIDTH);

    let id = Resizer::new(&doc, ".container", ResizerOptions::default())
        .unwrap()
        .id();
    assert_eq!(Resizer::lookup(&doc, &fixture.container), Some(id));
    assert_eq!(doc.listener_count(), 3);

    // A fresh resizer on the same container tears the old one down.
    let rz = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();
    assert!(!registry::is_active(id));
    rz.remove();
    assert_eq!(registry::active_count(), 0);
}

// ---------------------------------------------------------------------------
// Static factories
// ---------------------------------------------------------------------------

#[test]
fn test_create_handle() {
    let doc = MemoryDocument::new();
    let handle = Resizer::create_handle(&doc, "myHandleClass").unwrap();

    assert_eq!(doc.tag_name(&handle), "DIV");
    assert_eq!(doc.style(&handle, "cursor").as_deref(), Some("ew-resize"));
    assert!(doc.has_attribute(&handle, HANDLE_ATTRIBUTE));
    assert_eq!(
        doc.attribute(&handle, HANDLE_ATTRIBUTE).as_deref(),
        Some("myHandleClass")
    );
    assert_eq!(
        doc.attribute(&handle, "class").as_deref(),
        Some("myHandleClass")
    );
    // Created detached.
    assert_eq!(doc.parent(&handle), None);
}

#[test]
fn test_create_ghost() {
    let doc = MemoryDocument::new();
    let ghost = Resizer::create_ghost(&doc).unwrap();

    assert_eq!(doc.tag_name(&ghost), "DIV");
    assert_eq!(doc.style(&ghost, "position").as_deref(), Some("absolute"));
    assert_eq!(doc.style(&ghost, "top").as_deref(), Some("0px"));
    assert_eq!(doc.style(&ghost, "bottom").as_deref(), Some("0px"));
    assert_eq!(doc.style(&ghost, "display").as_deref(), Some("none"));

    let z_index: i32 = doc.style(&ghost, "z-index").unwrap().parse().unwrap();
    assert!(z_index > 9000);
    assert_eq!(z_index, GHOST_Z_INDEX);
}

// ---------------------------------------------------------------------------
// remove()
// ---------------------------------------------------------------------------

#[test]
fn test_remove_restores_container() {
    let (doc, rz) = setup();
    let container = rz.container();
    rz.set_handle_x(10.0);

    rz.remove();

    assert_eq!(Resizer::lookup(&doc, &container), None);
    assert_eq!(doc.style(&container, "position"), None);
    assert_eq!(
        doc.query_selector_in(&container, "[data-rz-handle]").unwrap(),
        None
    );
    assert!(!doc.children(&container).contains(&rz.ghost()));
    assert_eq!(doc.style(&rz.target(), "flex"), None);
    assert_eq!(doc.listener_count(), 0);
    assert!(rz.is_removed());
}

#[test]
fn test_remove_twice_is_harmless() {
    let (doc, rz) = setup();
    rz.remove();
    doc.clear_calls();

    rz.remove();
    assert!(doc.calls().is_empty());
}

#[test]
fn test_remove_while_dragging() {
    let (doc, rz) = setup();
    rz.on_down(&mut pointer());
    assert!(rz.is_dragging());

    rz.remove();
    assert!(!rz.is_dragging());
    assert_eq!(doc.style(&rz.target(), "flex"), None);

    // A late release does not resurrect the target's basis.
    rz.on_up(&mut PointerEvent::up(Vec2::new(100.0, 0.0)));
    assert_eq!(doc.style(&rz.target(), "flex"), None);
}

// ---------------------------------------------------------------------------
// set_handle_x()
// ---------------------------------------------------------------------------

#[test]
fn test_set_handle_x_moves_ghost() {
    let (doc, rz) = setup();
    rz.set_handle_x(CONTAINER_WIDTH - 1.0);
    assert_eq!(doc.style(&rz.ghost(), "left").as_deref(), Some("299px"));
}

#[test]
fn test_set_handle_x_clamps_to_client_width() {
    let (doc, rz) = setup();
    assert_eq!(rz.set_handle_x(CONTAINER_WIDTH + 100.0), CONTAINER_WIDTH);
    assert_eq!(doc.style(&rz.ghost(), "left").as_deref(), Some("300px"));
}

#[test]
fn test_set_handle_x_clamps_to_zero() {
    let (doc, rz) = setup();
    assert_eq!(rz.set_handle_x(-100.0), 0.0);
    assert_eq!(doc.style(&rz.ghost(), "left").as_deref(), Some("0px"));
}

#[test]
fn test_set_handle_x_stores_value() {
    let (_doc, rz) = setup();
    assert_eq!(rz.set_handle_x(1.0), 1.0);
    assert_eq!(rz.handle_x(), 1.0);
}

// ---------------------------------------------------------------------------
// set_dragging()
// ---------------------------------------------------------------------------

#[test]
fn test_set_dragging_defaults_to_true() {
    let (doc, rz) = setup();
    assert!(rz.set_dragging(None));
    assert!(rz.is_dragging());
    assert_eq!(doc.style(&rz.ghost(), "display").as_deref(), Some("block"));
}

#[test]
fn test_set_dragging_false_hides_ghost() {
    let (doc, rz) = setup();
    rz.set_dragging(true);

    assert!(!rz.set_dragging(false));
    assert!(!rz.is_dragging());
    assert_eq!(doc.style(&rz.ghost(), "display").as_deref(), Some("none"));
}

// ---------------------------------------------------------------------------
// Pointer handlers
// ---------------------------------------------------------------------------

fn ghost_display_writes(doc: &MemoryDocument, ghost: NodeId) -> usize {
    doc.count_style_writes(ghost, "display")
}

#[test]
fn test_on_down_prevents_default() {
    let (_doc, rz) = setup();
    let mut evt = pointer();
    rz.on_down(&mut evt);
    assert!(evt.default_prevented());
}

#[test]
fn test_on_down_records_offset() {
    let (doc, rz) = setup();
    let mut evt = pointer();
    rz.on_down(&mut evt);

    assert_eq!(rz.offset_x(), evt.offset.x);
    assert!(rz.is_dragging());
    assert_eq!(doc.style(&rz.ghost(), "display").as_deref(), Some("block"));
}

#[test]
fn test_click_without_move_keeps_handle_x() {
    let doc = MemoryDocument::new();
    create_container(&doc, 400.0);
    let rz = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();
    rz.set_handle_x(150.0);
    let ghost = rz.ghost();
    let left_writes = doc.count_style_writes(ghost, "left");

    rz.on_down(&mut pointer());
    assert_eq!(rz.handle_x(), 150.0);
    assert_eq!(doc.count_style_writes(ghost, "left"), left_writes);

    rz.on_up(&mut PointerEvent::up(Vec2::new(10.0, 0.0)));
    assert_eq!(rz.handle_x(), 150.0);
    assert_eq!(
        doc.style(&rz.target(), "flex").as_deref(),
        Some("0 0 242px")
    );
}

#[test]
fn test_on_down_while_dragging_keeps_offset_zero() {
    let (doc, rz) = setup();
    rz.set_dragging(true);
    let ghost = rz.ghost();
    let before = ghost_display_writes(&doc, ghost);

    let mut evt = pointer();
    rz.on_down(&mut evt);

    assert!(evt.default_prevented());
    assert_eq!(rz.offset_x(), 0.0);
    assert!(rz.is_dragging());
    // Dragging was not toggled again.
    assert_eq!(ghost_display_writes(&doc, ghost), before);
}

#[test]
fn test_on_up_prevents_default_and_stops_dragging() {
    let (doc, rz) = setup();
    rz.set_dragging(true);

    let mut evt = PointerEvent::up(Vec2::new(20.0, 0.0));
    rz.on_up(&mut evt);

    assert!(evt.default_prevented());
    assert!(!rz.is_dragging());
    assert_eq!(doc.style(&rz.ghost(), "display").as_deref(), Some("none"));
}

#[test]
fn test_on_up_when_idle_still_hides_ghost() {
    let (doc, rz) = setup();
    let ghost = rz.ghost();
    let before = ghost_display_writes(&doc, ghost);

    let mut evt = PointerEvent::up(Vec2::new(20.0, 0.0));
    rz.on_up(&mut evt);

    assert!(evt.default_prevented());
    assert_eq!(ghost_display_writes(&doc, ghost), before + 1);
    // No drag ended, so nothing was committed.
    assert_eq!(doc.style(&rz.target(), "flex").as_deref(), Some("0 0 auto"));
}

#[test]
fn test_on_move_prevents_default() {
    let (_doc, rz) = setup();
    rz.set_dragging(true);

    let mut evt = PointerEvent::moved(Vec2::ZERO);
    rz.on_move(&mut evt);
    assert!(evt.default_prevented());
}

#[test]
fn test_on_move_sets_handle_x_while_dragging() {
    let (doc, rz) = setup();
    rz.set_dragging(true);
    let ghost = rz.ghost();
    let before = doc.count_style_writes(ghost, "left");

    rz.on_move(&mut PointerEvent::moved(Vec2::new(120.0, 5.0)));

    assert_eq!(doc.count_style_writes(ghost, "left"), before + 1);
    assert_eq!(rz.handle_x(), 120.0);
}

#[test]
fn test_on_move_ignored_when_not_dragging() {
    let (doc, rz) = setup();
    let ghost = rz.ghost();
    let before = doc.count_style_writes(ghost, "left");

    let mut evt = PointerEvent::moved(Vec2::new(120.0, 5.0));
    rz.on_move(&mut evt);

    assert!(evt.default_prevented());
    assert_eq!(doc.count_style_writes(ghost, "left"), before);
    assert_eq!(rz.handle_x(), 0.0);
}

// ---------------------------------------------------------------------------
// Properties and options
// ---------------------------------------------------------------------------

#[test]
fn test_initial_state() {
    let (_doc, rz) = setup();
    assert_eq!(rz.offset_x(), 0.0);
    assert!(!rz.is_dragging());
    assert_eq!(rz.handle_x(), 0.0);
}

#[test]
fn test_default_options() {
    assert_eq!(ResizerOptions::DEFAULT.width, 8.0);
    assert_eq!(ResizerOptions::default().width, 8.0);
}

#[test]
fn test_custom_width() {
    let doc = MemoryDocument::new();
    create_container(&doc, CONTAINER_WIDTH);

    let rz = Resizer::new(&doc, ".container", ResizerOptions::new().width(10.0)).unwrap();
    assert_eq!(rz.options().width, 10.0);
    assert_eq!(doc.style(&rz.handle(), "width").as_deref(), Some("10px"));
}

#[test]
fn test_custom_handle_class() {
    let doc = MemoryDocument::new();
    create_container(&doc, CONTAINER_WIDTH);

    let rz = Resizer::new(
        &doc,
        ".container",
        ResizerOptions::new().handle_class("split-bar"),
    )
    .unwrap();
    assert_eq!(
        doc.query_selector("[data-rz-handle=split-bar]").unwrap(),
        Some(rz.handle())
    );
    assert_eq!(doc.query_selector(".split-bar").unwrap(), Some(rz.handle()));
}

#[test]
fn test_construction_is_recorded_in_order() {
    let doc = MemoryDocument::new();
    create_container(&doc, CONTAINER_WIDTH);
    doc.clear_calls();

    let rz = Resizer::new(&doc, ".container", ResizerOptions::default()).unwrap();
    let calls = doc.calls();

    let handle_insert = calls
        .iter()
        .position(|c| matches!(c, DomCall::InsertChild { child, .. } if *child == rz.handle()))
        .unwrap();
    let first_listener = calls
        .iter()
        .position(|c| matches!(c, DomCall::AddListener { .. }))
        .unwrap();
    assert!(handle_insert < first_listener);
}
