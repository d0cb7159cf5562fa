//! Runtime Integration Tests
//!
//! Tests for:
//! - Frame counting and the end-of-frame boundary
//! - Node helpers (default components, child spawning)
//! - A small game loop across several scene changes

use kindle::EntityAllocator;
use kindle::prelude::*;

fn level(name: &str, enemies: usize) -> Vec<StageNode> {
    let mut root = StageNode::new(name, NodeType::Node2D);
    for i in 0..enemies {
        root = root.with_child(StageNode::new(format!("Enemy{i}"), NodeType::ColorSquare));
    }
    vec![root]
}

fn runtime() -> Runtime {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut runtime = Runtime::new();
    runtime.runner.register("menu", level("Menu", 0));
    runtime.runner.register("level_1", level("Level1", 3));
    runtime.runner.register("level_2", level("Level2", 5));
    runtime
}

#[test]
fn runtime_counts_frames() -> anyhow::Result<()> {
    let mut runtime = runtime();
    assert_eq!(runtime.frame_count(), 0);
    for _ in 0..3 {
        runtime.end_frame()?;
    }
    assert_eq!(runtime.frame_count(), 3);
    Ok(())
}

#[test]
fn runtime_counts_failed_frames() {
    let mut runtime = runtime();
    runtime.change_scene("missing");
    assert!(runtime.end_frame().is_err());
    assert_eq!(runtime.frame_count(), 1);
}

#[test]
fn runtime_root_is_bound_after_first_frame() -> anyhow::Result<()> {
    let mut runtime = runtime();
    assert!(runtime.root_entity().is_none());

    runtime.change_scene("menu");
    assert!(runtime.root_entity().is_none());
    runtime.end_frame()?;

    let root = runtime.root_entity().expect("root");
    assert_eq!(
        runtime.components.node(root).map(|n| n.name.as_str()),
        Some("Menu")
    );
    assert!(runtime.systems.is_scheduled(root));
    Ok(())
}

#[test]
fn runtime_new_node_carries_inherited_components() {
    let mut runtime = runtime();
    let label = runtime.new_node(NodeType::TextLabel, "Label");

    assert!(runtime.components.has(label, ComponentKind::Node));
    assert!(runtime.components.has(label, ComponentKind::Transform2D));
    assert!(runtime.components.has(label, ComponentKind::TextLabel));
    assert!(!runtime.components.has(label, ComponentKind::Sprite));
    assert!(!runtime.scene.contains_entity(label));

    let plain = runtime.new_node(NodeType::Node, "Plain");
    assert!(!runtime.components.has(plain, ComponentKind::Transform2D));
}

#[test]
fn runtime_released_entities_are_reused() -> anyhow::Result<()> {
    let mut runtime = runtime();
    runtime.change_scene("level_1");
    runtime.end_frame()?;
    let old_root = runtime.root_entity().expect("root");
    assert_eq!(runtime.entities.len(), 4);

    runtime.change_scene("menu");
    runtime.end_frame()?;
    assert_eq!(runtime.entities.len(), 1);
    assert_eq!(runtime.scene.entity_count(), 1);
    assert_eq!(runtime.systems.member_count(), 1);
    assert!(!runtime.entities.contains(old_root));

    // The old root is released last, so it is handed out first.
    assert_eq!(runtime.entities.allocate(), old_root);
    Ok(())
}

#[test]
fn runtime_game_loop_across_scenes() -> anyhow::Result<()> {
    let mut runtime = runtime();
    let schedule = [
        (0, Some("level_1")),
        (5, Some("level_2")),
        (9, Some("menu")),
        (12, None),
    ];

    let mut enemy_counts = Vec::new();
    for (frame, next) in schedule {
        while runtime.frame_count() < frame {
            runtime.end_frame()?;
        }
        if let Some(path) = next {
            assert!(runtime.change_scene(path));
        }
        runtime.end_frame()?;

        let root = runtime.root_entity().expect("root");
        enemy_counts.push(runtime.scene.children_of(root).len());
    }

    assert_eq!(enemy_counts, vec![3, 5, 0, 0]);
    assert_eq!(runtime.frame_count(), 13);
    assert_eq!(runtime.scene.entity_count(), 1);
    assert_eq!(runtime.scene.node_count(), 1);
    Ok(())
}

#[test]
fn runtime_player_despawn_mid_scene() -> anyhow::Result<()> {
    let mut runtime = runtime();
    runtime.change_scene("level_1");
    runtime.end_frame()?;

    let root = runtime.root_entity().expect("root");
    let enemy = runtime.child_by_name(root, "Enemy1").expect("enemy");
    let weapon = runtime.spawn_child(enemy, NodeType::Sprite, "Weapon");
    runtime.end_frame()?;

    assert!(runtime.systems.is_scheduled(weapon));
    assert_eq!(runtime.queue_deletion(enemy), 2);
    assert!(!runtime.systems.is_scheduled(weapon));
    runtime.end_frame()?;

    assert!(!runtime.scene.contains_entity(weapon));
    assert!(!runtime.systems.is_scheduled(weapon));
    assert_eq!(runtime.scene.children_of(root).len(), 2);
    assert!(runtime.child_by_name(root, "Enemy1").is_none());
    Ok(())
}

#[test]
fn runtime_scene_change_resets_camera() -> anyhow::Result<()> {
    let mut runtime = runtime();
    runtime.change_scene("menu");
    runtime.end_frame()?;

    runtime.camera.zoom = Vec2::splat(3.0);
    runtime.camera.offset = Vec2::new(4.0, 4.0);
    runtime.end_frame()?;
    assert_eq!(runtime.camera.zoom, Vec2::splat(3.0));

    runtime.change_scene("level_1");
    runtime.end_frame()?;
    assert_eq!(runtime.camera, kindle::Camera2D::default());
    Ok(())
}
