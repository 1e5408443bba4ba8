//! Per-frame buffer update tests
//!
//! Tests for:
//! - update_buffers dispatch: mesh uniforms, camera push, light batching
//! - Light batch ordering (traversal order) and per-frame isolation
//! - Out-of-range frame index handling

use std::sync::Arc;

use glam::{Quat, UVec2, Vec3};
use nightbird::assets::ModelRepository;
use nightbird::renderer::GlobalFrameState;
use nightbird::resources::uniforms::{CameraUniforms, PointLightData};
use nightbird::resources::{Mesh, MeshPrimitive, Vertex};
use nightbird::scene::{Camera, PointLight, Scene};

// ============================================================================
// Helpers
// ============================================================================

const VIEWPORT: UVec2 = UVec2::new(1280, 720);

fn new_scene() -> (Scene, Arc<GlobalFrameState>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let globals = Arc::new(GlobalFrameState::new(2));
    let scene = Scene::new(Arc::new(ModelRepository::new()), globals.clone());
    (scene, globals)
}

fn test_mesh() -> Arc<Mesh> {
    let vertices = [Vertex::default(); 3];
    let mut mesh = Mesh::new("Tri");
    mesh.add_primitive(MeshPrimitive::new("Tri", &vertices, Some(&[0, 1, 2])));
    Arc::new(mesh)
}

fn read_lights(globals: &GlobalFrameState, frame: usize) -> Vec<PointLightData> {
    let buffer = globals.light_buffer(frame).unwrap();
    let data = buffer.read_data();
    let bytes: &[u8] = &data;
    bytemuck::pod_collect_to_vec(bytes)
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn update_buffers_dispatches_once_per_node_kind() {
    let (mut scene, globals) = new_scene();

    let mesh_node = scene.create_mesh_instance(
        "Mesh",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        test_mesh(),
    );
    scene.create_camera(
        "Camera",
        Vec3::new(0.0, 0.0, 5.0),
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::new_perspective(60.0, 0.1, 100.0),
    );
    scene.create_point_light(
        "LightA",
        Vec3::new(1.0, 0.0, 0.0),
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        PointLight::new(Vec3::ONE, 2.0, 10.0),
    );
    scene.create_point_light(
        "LightB",
        Vec3::new(2.0, 0.0, 0.0),
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        PointLight::new(Vec3::X, 1.0, 5.0),
    );

    scene.update_buffers(0, VIEWPORT);

    // 2 lights in one batch, exactly one camera update, one mesh refresh
    assert_eq!(globals.light_count(0), 2);
    assert_eq!(globals.camera_buffer(0).unwrap().version(), 1);

    let instance = scene.get_node(mesh_node).unwrap().as_mesh_instance().unwrap();
    assert_eq!(instance.uniform_buffer(0).unwrap().version(), 1);

    // The other frame in flight is untouched
    assert_eq!(globals.light_count(1), 0);
    assert_eq!(globals.camera_buffer(1).unwrap().version(), 0);
    assert_eq!(instance.uniform_buffer(1).unwrap().version(), 0);
}

#[test]
fn light_batch_preserves_traversal_order() {
    let (mut scene, globals) = new_scene();

    let group = scene.create_object("Group", Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, None);
    scene.create_point_light(
        "First",
        Vec3::new(1.0, 0.0, 0.0),
        Quat::IDENTITY,
        Vec3::ONE,
        Some(group),
        PointLight::default(),
    );
    scene.create_point_light(
        "Second",
        Vec3::new(2.0, 0.0, 0.0),
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        PointLight::default(),
    );

    scene.update_buffers(0, VIEWPORT);

    let lights = read_lights(&globals, 0);
    assert_eq!(lights.len(), 2);
    assert_eq!(lights[0].position, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(lights[1].position, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn light_position_is_world_space() {
    let (mut scene, globals) = new_scene();

    let pivot = scene.create_object(
        "Pivot",
        Vec3::new(0.0, 5.0, 0.0),
        Quat::IDENTITY,
        Vec3::ONE,
        None,
    );
    scene.create_point_light(
        "Light",
        Vec3::new(1.0, 0.0, 0.0),
        Quat::IDENTITY,
        Vec3::ONE,
        Some(pivot),
        PointLight::new(Vec3::ONE, 3.0, 20.0),
    );

    scene.update_buffers(0, VIEWPORT);

    let lights = read_lights(&globals, 0);
    assert_eq!(lights.len(), 1);
    assert!((lights[0].position - Vec3::new(1.0, 5.0, 0.0)).length() < 1e-5);
    assert!((lights[0].range - 20.0).abs() < 1e-5);
    assert!((lights[0].intensity - 3.0).abs() < 1e-5);
}

#[test]
fn camera_uniforms_reflect_world_transform() {
    let (mut scene, globals) = new_scene();

    scene.create_camera(
        "Camera",
        Vec3::new(0.0, 0.0, 5.0),
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        Camera::new_perspective(60.0, 0.1, 100.0),
    );

    scene.update_buffers(1, VIEWPORT);

    let buffer = globals.camera_buffer(1).unwrap();
    let data = buffer.read_data();
    let bytes: &[u8] = &data;
    let uniforms: Vec<CameraUniforms> = bytemuck::pod_collect_to_vec(bytes);
    assert_eq!(uniforms.len(), 1);
    assert_eq!(uniforms[0].position.truncate(), Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn empty_light_batch_clears_previous_frame_data() {
    let (mut scene, globals) = new_scene();

    let light = scene.create_point_light(
        "Light",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        PointLight::default(),
    );
    scene.update_buffers(0, VIEWPORT);
    assert_eq!(globals.light_count(0), 1);

    scene.remove_object(light).unwrap();
    scene.update_buffers(0, VIEWPORT);
    assert_eq!(globals.light_count(0), 0);
}

// ============================================================================
// Frame Index Bounds
// ============================================================================

#[test]
fn out_of_range_frame_index_is_ignored() {
    let (mut scene, globals) = new_scene();
    scene.create_point_light(
        "Light",
        Vec3::ZERO,
        Quat::IDENTITY,
        Vec3::ONE,
        None,
        PointLight::default(),
    );

    // Logged and dropped, never a panic
    scene.update_buffers(7, VIEWPORT);
    assert_eq!(globals.light_count(0), 0);
    assert_eq!(globals.light_count(7), 0);
}
