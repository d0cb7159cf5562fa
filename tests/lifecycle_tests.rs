//! Entity Lifecycle Integration Tests
//!
//! Tests for:
//! - Creation / deletion queues and their flushes
//! - Duplicate-request warnings (captured through a test logger)
//! - Cascading subtree deletion
//! - Scene swap state machine
//! - Frame-boundary ordering and re-entrancy guard

use std::cell::RefCell;
use std::sync::Once;

use kindle::kindle_scene::FramePhase;
use kindle::prelude::*;
use kindle::{SceneScriptRunner, Services};
use log::{Level, LevelFilter, Log, Metadata, Record};

// ============================================================================
// Capturing Logger
// ============================================================================

thread_local! {
    static WARNINGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;
static INIT: Once = Once::new();

/// Installs the logger and clears this thread's captured warnings.
fn capture_warnings() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger installed");
        log::set_max_level(LevelFilter::Warn);
    });
    WARNINGS.with(|w| w.borrow_mut().clear());
}

fn warnings() -> Vec<String> {
    WARNINGS.with(|w| w.borrow().clone())
}

fn runtime_with_root() -> (Runtime, Entity) {
    capture_warnings();
    let mut runtime = Runtime::new();
    runtime
        .runner
        .register("a", vec![StageNode::new("RootA", NodeType::Node2D)]);
    runtime.change_scene("a");
    runtime.end_frame().expect("scene loads");
    let root = runtime.root_entity().expect("root bound");
    (runtime, root)
}

/// Asserts `entity` left the index, every system, the component store and
/// the allocator.
fn assert_reclaimed(runtime: &Runtime, entity: Entity) {
    assert!(!runtime.scene.contains_entity(entity), "'{entity}' still indexed");
    assert!(!runtime.systems.is_member(entity), "'{entity}' still a member");
    assert!(!runtime.systems.is_scheduled(entity), "'{entity}' still scheduled");
    assert!(
        runtime.components.node(entity).is_none(),
        "'{entity}' still has components"
    );
    assert!(!runtime.entities.contains(entity), "'{entity}' still allocated");
}

// ============================================================================
// Queues
// ============================================================================

#[test]
fn lifecycle_empty_flushes_are_noops() {
    capture_warnings();
    let mut runtime = Runtime::new();
    let (scene, mut services) = runtime.split();

    scene.flush_creations(services.systems);
    scene.flush_deletions(&mut services);

    assert!(scene.pending_creations().is_empty());
    assert!(scene.pending_deletions().is_empty());
    assert_eq!(scene.phase(), FramePhase::Idle);
}

#[test]
fn lifecycle_creation_flush_starts_entities() {
    let (mut runtime, root) = runtime_with_root();
    let child = runtime.spawn_child(root, NodeType::Node2D, "Child");
    assert!(runtime.systems.is_member(child));
    assert!(!runtime.systems.is_scheduled(child));

    runtime.end_frame().expect("frame");
    assert!(runtime.systems.is_scheduled(child));
    assert!(runtime.scene.pending_creations().is_empty());
}

#[test]
fn lifecycle_duplicate_deletion_warns_once() {
    let (mut runtime, root) = runtime_with_root();
    let child = runtime.spawn_child(root, NodeType::Node2D, "Child");
    runtime.end_frame().expect("frame");

    assert!(runtime.scene.queue_for_deletion(child, &mut runtime.systems));
    assert!(runtime.scene.is_queued_for_deletion(child));
    assert!(!runtime.scene.queue_for_deletion(child, &mut runtime.systems));

    assert_eq!(runtime.scene.pending_deletions(), &[child]);
    let warnings = warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("already queued for deletion"));
}

#[test]
fn lifecycle_deletion_stops_scheduling_immediately() {
    let (mut runtime, root) = runtime_with_root();
    let child = runtime.spawn_child(root, NodeType::Node2D, "Child");
    runtime.end_frame().expect("frame");

    runtime.scene.queue_for_deletion(child, &mut runtime.systems);
    assert!(!runtime.systems.is_scheduled(child));
    // Storage survives until the flush.
    assert!(runtime.scene.contains_entity(child));
    assert!(runtime.components.node(child).is_some());

    runtime.end_frame().expect("frame");
    assert!(!runtime.scene.contains_entity(child));
    assert!(runtime.components.node(child).is_none());
    assert!(!runtime.systems.is_member(child));
}

#[test]
fn lifecycle_cascade_deletion_clears_subtree() {
    let (mut runtime, root) = runtime_with_root();
    let a = runtime.spawn_child(root, NodeType::Node2D, "A");
    let b = runtime.spawn_child(a, NodeType::Node2D, "B");
    let c = runtime.spawn_child(a, NodeType::Node2D, "C");
    let d = runtime.spawn_child(root, NodeType::Node2D, "D");
    runtime.end_frame().expect("frame");

    assert_eq!(runtime.queue_deletion(a), 3);
    assert_eq!(runtime.scene.pending_deletions(), &[b, c, a]);
    runtime.end_frame().expect("frame");

    for e in [a, b, c] {
        assert!(!runtime.scene.contains_entity(e));
        assert!(!runtime.systems.is_member(e));
    }
    assert_eq!(runtime.scene.children_of(root), vec![d]);
}

#[test]
fn lifecycle_cascade_over_already_queued_child() {
    let (mut runtime, root) = runtime_with_root();
    let a = runtime.spawn_child(root, NodeType::Node2D, "A");
    let b = runtime.spawn_child(a, NodeType::Node2D, "B");
    runtime.end_frame().expect("frame");

    runtime.scene.queue_for_deletion(b, &mut runtime.systems);
    assert_eq!(runtime.queue_deletion(a), 1);
    assert_eq!(warnings().len(), 1);

    runtime.end_frame().expect("frame");
    assert!(!runtime.scene.contains_entity(a));
    assert!(!runtime.scene.contains_entity(b));
}

#[test]
fn lifecycle_deleting_parent_alone_takes_descendants() {
    let (mut runtime, root) = runtime_with_root();
    let parent = runtime.spawn_child(root, NodeType::Node2D, "Parent");
    let child = runtime.spawn_child(parent, NodeType::Node2D, "Child");
    let grandchild = runtime.spawn_child(child, NodeType::Sprite, "Grandchild");
    let sibling = runtime.spawn_child(root, NodeType::Node2D, "Sibling");
    runtime.end_frame().expect("frame");

    assert!(runtime.scene.queue_for_deletion(parent, &mut runtime.systems));
    assert!(runtime.systems.is_scheduled(child));
    runtime.end_frame().expect("frame");

    for e in [parent, child, grandchild] {
        assert_reclaimed(&runtime, e);
    }
    assert_eq!(runtime.scene.children_of(root), vec![sibling]);
    assert_eq!(runtime.scene.entity_count(), 2);
    assert_eq!(runtime.scene.node_count(), 2);
    assert!(warnings().is_empty());
}

#[test]
fn lifecycle_parent_deleted_alone_leaves_nothing_for_next_scene() {
    let (mut runtime, root) = runtime_with_root();
    let parent = runtime.spawn_child(root, NodeType::Node2D, "Parent");
    let grandchild = runtime.spawn_child(parent, NodeType::Node2D, "Grandchild");
    runtime.end_frame().expect("frame");

    runtime.scene.queue_for_deletion(parent, &mut runtime.systems);
    runtime.end_frame().expect("frame");
    assert_reclaimed(&runtime, grandchild);

    runtime
        .runner
        .register("b", vec![StageNode::new("RootB", NodeType::Node2D)]);
    runtime.change_scene("b");
    runtime.end_frame().expect("frame");

    // Released handles may be reused by scene B, so count what is left.
    let root_b = runtime.root_entity().expect("new root");
    assert!(runtime.components.node(root_b).is_some_and(|n| n.name == "RootB"));
    assert_eq!(runtime.scene.entity_count(), 1);
    assert_eq!(runtime.scene.node_count(), 1);
    assert_eq!(runtime.systems.member_count(), 1);
    assert_eq!(runtime.systems.scheduled_count(), 1);
    assert_eq!(runtime.components.entity_count(), 1);
    assert_eq!(runtime.entities.len(), 1);
}

#[test]
fn lifecycle_parent_and_child_pending_creation_are_both_dropped() {
    let (mut runtime, root) = runtime_with_root();
    let parent = runtime.spawn_child(root, NodeType::Node2D, "Parent");
    let child = runtime.spawn_child(parent, NodeType::Node2D, "Child");

    runtime.scene.queue_for_deletion(parent, &mut runtime.systems);
    runtime.end_frame().expect("frame");

    assert!(runtime.scene.pending_creations().is_empty());
    assert_reclaimed(&runtime, parent);
    assert_reclaimed(&runtime, child);
}

#[test]
#[should_panic(expected = "Doesn't have entity")]
fn lifecycle_deleted_entity_lookup_is_fatal() {
    let (mut runtime, root) = runtime_with_root();
    let a = runtime.spawn_child(root, NodeType::Node2D, "A");
    runtime.queue_deletion(a);
    runtime.end_frame().expect("frame");
    let _ = runtime.scene.tree_node(a);
}

#[test]
fn lifecycle_entity_created_and_deleted_same_frame_never_starts() {
    let (mut runtime, root) = runtime_with_root();
    let a = runtime.spawn_child(root, NodeType::Node2D, "A");
    runtime.queue_deletion(a);
    runtime.end_frame().expect("frame");

    assert!(!runtime.systems.is_scheduled(a));
    assert!(runtime.scene.pending_creations().is_empty());
}

#[test]
#[should_panic(expected = "Creation queue is full")]
fn lifecycle_creation_capacity_is_fatal() {
    capture_warnings();
    let mut runtime = Runtime::with_settings(SceneSettings {
        max_entities: 2,
        ..SceneSettings::default()
    });
    runtime.runner.register(
        "a",
        vec![
            StageNode::new("Root", NodeType::Node)
                .with_child(StageNode::new("One", NodeType::Node))
                .with_child(StageNode::new("Two", NodeType::Node)),
        ],
    );
    runtime.change_scene("a");
    let _ = runtime.end_frame();
}

// ============================================================================
// Scene Swap
// ============================================================================

#[test]
fn lifecycle_second_scene_request_is_rejected() {
    let (mut runtime, _root) = runtime_with_root();
    assert!(runtime.change_scene("b"));
    assert!(!runtime.change_scene("c"));

    assert_eq!(runtime.scene.queued_scene().map(|s| s.path()), Some("b"));
    let warnings = warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("not loading 'c'"));
}

#[test]
fn lifecycle_scene_swap_tears_down_old_tree() {
    let (mut runtime, root_a) = runtime_with_root();
    let mut parent = root_a;
    for depth in 0..12 {
        parent = runtime.spawn_child(parent, NodeType::Sprite, &format!("Deep{depth}"));
        runtime.spawn_child(parent, NodeType::Node, &format!("Leaf{depth}"));
    }
    runtime.end_frame().expect("frame");
    runtime.camera.position = Vec2::new(100.0, 50.0);

    let scene_a = runtime.scene.subtree_entities(root_a);
    assert_eq!(scene_a.len(), 25);
    for &e in &scene_a {
        assert!(runtime.systems.is_scheduled(e));
    }

    runtime.runner.register(
        "b",
        vec![
            StageNode::new("RootB", NodeType::Node2D)
                .with_child(StageNode::new("ChildB", NodeType::Node)),
        ],
    );
    runtime.change_scene("b");
    runtime.end_frame().expect("frame");

    for &e in &scene_a {
        assert_reclaimed(&runtime, e);
    }
    assert_eq!(runtime.camera.position, Vec2::ZERO);
    assert_eq!(runtime.scene.active_scene().map(|s| s.path()), Some("b"));
    assert!(runtime.scene.queued_scene().is_none());

    let root_b = runtime.root_entity().expect("new root");
    assert!(runtime.child_by_name(root_b, "ChildB").is_some());
    assert_eq!(runtime.scene.entity_count(), 2);
    assert_eq!(runtime.scene.node_count(), 2);
    assert_eq!(runtime.systems.member_count(), 2);
    assert_eq!(runtime.entities.len(), 2);
}

#[test]
fn lifecycle_scene_swap_tears_down_unlinked_nodes() {
    let (mut runtime, _root) = runtime_with_root();
    let loose = runtime.new_node(NodeType::Node2D, "Loose");
    let node = runtime.scene.create_node(loose, None);
    runtime.scene.queue_for_creation(node);
    runtime.end_frame().expect("frame");
    assert!(runtime.scene.contains_entity(loose));

    runtime
        .runner
        .register("b", vec![StageNode::new("RootB", NodeType::Node2D)]);
    runtime.change_scene("b");
    runtime.end_frame().expect("frame");

    assert_reclaimed(&runtime, loose);
    assert_eq!(runtime.scene.entity_count(), 1);
}

#[test]
#[should_panic(expected = "overwrite an already existing scene root")]
fn lifecycle_second_root_is_fatal() {
    capture_warnings();
    let mut runtime = Runtime::new();
    runtime.runner.register(
        "a",
        vec![
            StageNode::new("First", NodeType::Node2D),
            StageNode::new("Second", NodeType::Node2D),
        ],
    );
    runtime.change_scene("a");
    let _ = runtime.end_frame();
}

#[test]
fn lifecycle_no_queued_scene_is_noop() {
    let (mut runtime, root) = runtime_with_root();
    runtime.end_frame().expect("frame");
    assert_eq!(runtime.root_entity(), Some(root));
}

#[test]
fn lifecycle_failed_scene_still_flushes_teardown() {
    let (mut runtime, root_a) = runtime_with_root();
    runtime.change_scene("missing");

    let err = runtime.end_frame().expect_err("scene is not registered");
    assert!(matches!(err, KindleError::SceneNotFound(_)));
    assert!(!runtime.scene.contains_entity(root_a));
    assert!(runtime.root_entity().is_none());
}

// ============================================================================
// Re-entrancy
// ============================================================================

struct ReentrantRunner;

impl SceneScriptRunner for ReentrantRunner {
    fn run_scene_script(
        &mut self,
        _path: &str,
        scene: &mut SceneManager,
        services: &mut Services<'_>,
    ) -> Result<()> {
        // Queuing from inside population is fine; applying is not.
        assert!(scene.queue_scene_change("nested"));
        scene.apply_queued_scene_change(services, self)
    }
}

#[test]
#[should_panic(expected = "Cannot start ApplyingSceneChange while ApplyingSceneChange")]
fn lifecycle_nested_scene_change_is_fatal() {
    capture_warnings();
    let mut runtime = Runtime::new();
    runtime.change_scene("a");
    let (scene, mut services) = runtime.split();
    let _ = scene.apply_queued_scene_change(&mut services, &mut ReentrantRunner);
}
