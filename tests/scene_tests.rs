//! Scene Integration Tests
//!
//! Tests for:
//! - Factories: create object/camera/light/mesh instance/prefab instance
//! - Name registry: unique-at-creation with numeric suffixes
//! - Hierarchy: set_parent, cycle rejection, subtree removal
//! - Queries: all_objects flattening, find_object path lookup
//! - Main camera: first-camera-wins, explicit setter, removal fallback

use std::sync::Arc;

use glam::{Quat, Vec3};
use nightbird::assets::ModelRepository;
use nightbird::errors::Error;
use nightbird::renderer::GlobalFrameState;
use nightbird::resources::{Mesh, MeshPrimitive, Vertex};
use nightbird::scene::{Camera, NodeKind, PointLight, Scene};

// ============================================================================
// Helpers
// ============================================================================

fn new_scene() -> Scene {
    let _ = env_logger::builder().is_test(true).try_init();
    Scene::new(
        Arc::new(ModelRepository::new()),
        Arc::new(GlobalFrameState::new(2)),
    )
}

fn spawn(scene: &mut Scene, name: &str) -> nightbird::scene::NodeHandle {
    scene.create_object(name, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, None)
}

fn test_mesh(name: &str) -> Arc<Mesh> {
    let vertices = [
        Vertex {
            position: [0.0, 0.0, 0.0],
            ..Vertex::default()
        },
        Vertex {
            position: [1.0, 0.0, 0.0],
            ..Vertex::default()
        },
        Vertex {
            position: [0.0, 1.0, 0.0],
            ..Vertex::default()
        },
    ];
    let mut mesh = Mesh::new(name);
    mesh.add_primitive(MeshPrimitive::new(name, &vertices, Some(&[0, 1, 2])));
    Arc::new(mesh)
}

// ============================================================================
// Factories
// ============================================================================

#[test]
fn scene_starts_with_root_only() {
    let scene = new_scene();
    assert_eq!(scene.node_count(), 1);

    let root = scene.get_node(scene.root()).unwrap();
    assert_eq!(root.name, "Root");
    assert!(matches!(root.kind, NodeKind::Group));
    assert_eq!(root.parent(), None);
}

#[test]
fn factories_default_to_root_parent() {
    let mut scene = new_scene();
    let handle = spawn(&mut scene, "Pivot");

    let node = scene.get_node(handle).unwrap();
    assert_eq!(node.parent(), Some(scene.root()));
    assert!(scene.get_node(scene.root()).unwrap().children().contains(&handle));
}

#[test]
fn factories_set_local_transform_fields_directly() {
    let mut scene = new_scene();
    let handle = scene.create_object(
        "Pivot",
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_rotation_y(0.5),
        Vec3::splat(2.0),
        None,
    );

    let transform = &scene.get_node(handle).unwrap().transform;
    assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(transform.rotation, Quat::from_rotation_y(0.5));
    assert_eq!(transform.scale, Vec3::splat(2.0));
}

#[test]
fn create_mesh_instance_shares_mesh() {
    let mut scene = new_scene();
    let mesh = test_mesh("Tri");

    let a = scene.create_mesh_instance(
        "A",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        mesh.clone(),
    );
    let b = scene.create_mesh_instance(
        "B",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        mesh.clone(),
    );

    let mesh_a = scene.get_node(a).unwrap().as_mesh_instance().unwrap();
    let mesh_b = scene.get_node(b).unwrap().as_mesh_instance().unwrap();
    assert!(Arc::ptr_eq(mesh_a.mesh(), mesh_b.mesh()));
}

#[test]
fn stale_parent_handle_falls_back_to_root() {
    let mut scene = new_scene();
    let parent = spawn(&mut scene, "Doomed");
    scene.remove_object(parent).unwrap();

    let child = scene.create_object("Orphan", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(parent));
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(scene.root()));
}

// ============================================================================
// Name Registry
// ============================================================================

#[test]
fn colliding_names_get_numeric_suffixes() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "Lamp");
    let b = spawn(&mut scene, "Lamp");
    let c = spawn(&mut scene, "Lamp");

    assert_eq!(scene.get_node(a).unwrap().name, "Lamp");
    assert_eq!(scene.get_node(b).unwrap().name, "Lamp1");
    assert_eq!(scene.get_node(c).unwrap().name, "Lamp2");

    assert_eq!(scene.find_object("Lamp1"), Some(b));
}

#[test]
fn removed_names_become_available_again() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "Lamp");
    scene.remove_object(a).unwrap();

    let b = spawn(&mut scene, "Lamp");
    assert_eq!(scene.get_node(b).unwrap().name, "Lamp");
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn set_parent_relinks_both_sides() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    let b = spawn(&mut scene, "B");
    let child = spawn(&mut scene, "Child");

    scene.set_parent(child, Some(a)).unwrap();
    assert!(scene.get_node(a).unwrap().children().contains(&child));

    scene.set_parent(child, Some(b)).unwrap();
    assert!(!scene.get_node(a).unwrap().children().contains(&child));
    assert!(scene.get_node(b).unwrap().children().contains(&child));
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
}

#[test]
fn set_parent_to_none_moves_under_root() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    let child = spawn(&mut scene, "Child");
    scene.set_parent(child, Some(a)).unwrap();

    scene.set_parent(child, None).unwrap();
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(scene.root()));
}

#[test]
fn set_parent_same_parent_is_noop() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    let child = spawn(&mut scene, "Child");
    scene.set_parent(child, Some(a)).unwrap();

    let children_before = scene.get_node(a).unwrap().children().to_vec();
    scene.set_parent(child, Some(a)).unwrap();
    assert_eq!(scene.get_node(a).unwrap().children(), children_before);
}

#[test]
fn set_parent_rejects_descendant_target() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    let b = spawn(&mut scene, "B");
    let c = spawn(&mut scene, "C");
    scene.set_parent(b, Some(a)).unwrap();
    scene.set_parent(c, Some(b)).unwrap();

    // Moving A under its grandchild would close a cycle
    let err = scene.set_parent(a, Some(c)).unwrap_err();
    assert!(matches!(err, Error::CyclicHierarchy { .. }));

    // Tree is unchanged
    assert_eq!(scene.get_node(a).unwrap().parent(), Some(scene.root()));
    assert_eq!(scene.get_node(c).unwrap().parent(), Some(b));
}

#[test]
fn set_parent_rejects_self() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    assert!(matches!(
        scene.set_parent(a, Some(a)),
        Err(Error::CyclicHierarchy { .. })
    ));
}

#[test]
fn root_cannot_be_reparented_or_removed() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    assert!(matches!(
        scene.set_parent(scene.root(), Some(a)),
        Err(Error::RootNode)
    ));
    assert!(matches!(
        scene.remove_object(scene.root()),
        Err(Error::RootNode)
    ));
}

#[test]
fn remove_object_removes_whole_subtree() {
    let mut scene = new_scene();
    let parent = spawn(&mut scene, "Parent");
    let child = spawn(&mut scene, "Child");
    let grandchild = spawn(&mut scene, "Grandchild");
    scene.set_parent(child, Some(parent)).unwrap();
    scene.set_parent(grandchild, Some(child)).unwrap();

    scene.remove_object(parent).unwrap();

    // Stale handles resolve to None instead of dangling
    assert!(scene.get_node(parent).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert_eq!(scene.node_count(), 1);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn all_objects_is_preorder_with_root_first() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    let a1 = scene.create_object("A1", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(a));
    let a2 = scene.create_object("A2", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(a));
    let b = spawn(&mut scene, "B");

    let flat = scene.all_objects();
    assert_eq!(flat, vec![scene.root(), a, a1, a2, b]);
}

#[test]
fn all_objects_counts_every_node_once() {
    let mut scene = new_scene();
    for i in 0..10 {
        let name = format!("N{i}");
        spawn(&mut scene, &name);
    }
    let doomed = spawn(&mut scene, "Doomed");
    scene.remove_object(doomed).unwrap();

    let flat = scene.all_objects();
    assert_eq!(flat.len(), 11);
    assert_eq!(flat.len(), scene.node_count());
}

#[test]
fn find_object_resolves_nested_paths() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    let b = scene.create_object("B", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(a));
    let c = scene.create_object("C", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(b));

    assert_eq!(scene.find_object("A"), Some(a));
    assert_eq!(scene.find_object("A/B"), Some(b));
    assert_eq!(scene.find_object("A/B/C"), Some(c));
    assert_eq!(scene.find_object_from(a, "B/C"), Some(c));
}

#[test]
fn find_object_fails_on_first_unmatched_segment() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    scene.create_object("B", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(a));

    assert_eq!(scene.find_object("Missing"), None);
    assert_eq!(scene.find_object("A/Missing"), None);
    assert_eq!(scene.find_object("A/B/Missing"), None);
    // Case-sensitive
    assert_eq!(scene.find_object("a/B"), None);
}

#[test]
fn object_path_round_trips_through_find_object() {
    let mut scene = new_scene();
    let a = spawn(&mut scene, "A");
    let b = scene.create_object("B", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(a));
    let c = scene.create_object("C", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Some(b));

    for handle in [a, b, c] {
        let path = scene.object_path(handle).unwrap();
        assert_eq!(scene.find_object(&path), Some(handle));
    }
    assert_eq!(scene.object_path(scene.root()).unwrap(), "");
}

// ============================================================================
// Main Camera
// ============================================================================

#[test]
fn first_camera_wins() {
    let mut scene = new_scene();
    assert_eq!(scene.main_camera(), None);

    let first = scene.create_camera(
        "Main",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::new_perspective(60.0, 0.1, 100.0),
    );
    let second = scene.create_camera(
        "Other",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::new_perspective(90.0, 0.1, 100.0),
    );

    assert_eq!(scene.main_camera(), Some(first));

    scene.set_main_camera(second).unwrap();
    assert_eq!(scene.main_camera(), Some(second));
}

#[test]
fn set_main_camera_rejects_non_camera_nodes() {
    let mut scene = new_scene();
    let light = scene.create_point_light(
        "Light",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        PointLight::default(),
    );
    assert!(matches!(
        scene.set_main_camera(light),
        Err(Error::NotACamera(_))
    ));
}

#[test]
fn removing_main_camera_falls_back_to_first_remaining() {
    let mut scene = new_scene();
    let first = scene.create_camera(
        "CamA",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::default(),
    );
    let second = scene.create_camera(
        "CamB",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::default(),
    );

    scene.remove_object(first).unwrap();
    assert_eq!(scene.main_camera(), Some(second));

    scene.remove_object(second).unwrap();
    assert_eq!(scene.main_camera(), None);
}

#[test]
fn removing_non_main_camera_keeps_main() {
    let mut scene = new_scene();
    let first = scene.create_camera(
        "CamA",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::default(),
    );
    let second = scene.create_camera(
        "CamB",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::default(),
    );

    scene.remove_object(second).unwrap();
    assert_eq!(scene.main_camera(), Some(first));
}
