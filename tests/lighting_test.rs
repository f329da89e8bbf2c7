mod common;

use approx::assert_relative_eq;
use cgmath::{Matrix4, Point3, SquareMatrix, Vector3, Vector4};
use common::test_utils::{FakeFactory, FakeGeometry, RecordingPipeline, fake_leaf};
use skyline::{
    camera::CameraUniform,
    config::Config,
    data_structures::{
        instance::{InstanceRaw, normal_matrix},
        scene_graph::{SceneGraph, StructuralError},
    },
    models::Building,
    pipelines::{
        LightingModel,
        light::{LightingParameters, LightingUniform, ParameterError, SCENE_SHININESS},
    },
    render::{LightingPipeline, render_scene},
    scene::Scene,
};

fn params() -> LightingParameters {
    LightingParameters::new(
        Vector3::new(0.9, 0.94, 0.96),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 3.0, 1.0),
    )
}

#[test]
fn scene_parameters_are_valid() {
    assert_eq!(params().validate(), Ok(()));
    assert_eq!(params().shininess, SCENE_SHININESS);
}

#[test]
fn out_of_range_intensity_is_reported() {
    let mut p = params();
    p.diffuse.y = 1.5;
    assert_eq!(
        p.validate(),
        Err(ParameterError::OutOfUnitRange {
            field: "diffuse",
            value: 1.5
        })
    );
}

#[test]
fn negative_attenuation_and_zero_shininess_are_reported() {
    let mut p = params();
    p.attenuation.linear = -0.1;
    assert!(matches!(
        p.validate(),
        Err(ParameterError::NegativeAttenuation { term: "linear", .. })
    ));

    let mut p = params();
    p.shininess = 0;
    assert_eq!(p.validate(), Err(ParameterError::ZeroShininess));
}

#[test]
fn sanitized_clamps_into_the_valid_domain() {
    let mut p = params();
    p.ambient = Vector3::new(-1.0, f32::NAN, 2.0);
    p.attenuation.quadratic = -3.0;
    p.shininess = 0;

    let clean = p.sanitized();
    assert_eq!(clean.validate(), Ok(()));
    assert_relative_eq!(clean.ambient, Vector3::new(0.0, 0.0, 1.0));
    assert_relative_eq!(clean.attenuation.quadratic, 0.0);
    assert_eq!(clean.shininess, 1);
    assert_eq!(clean.light_position, p.light_position);
}

#[test]
fn sanitized_keeps_valid_parameters() {
    assert_eq!(params().sanitized(), params());
}

#[test]
fn uniforms_match_the_shader_layout() {
    assert_eq!(std::mem::size_of::<LightingUniform>(), 128);
    assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 100);
}

#[test]
fn normal_matrix_keeps_normals_perpendicular() {
    let world = Matrix4::from_nonuniform_scale(1.0 / 3.0, 1.0 / 3.0, 10.8);
    let normal = normal_matrix(&world);
    // a slanted surface tangent and its normal before the scale
    let tangent = Vector4::new(1.0, 0.0, -1.0, 0.0);
    let n = Vector3::new(1.0, 0.0, 1.0);

    let t = (world * tangent).truncate();
    let n = normal * n;
    assert_relative_eq!(t.x * n.x + t.y * n.y + t.z * n.z, 0.0, epsilon = 1e-5);

    let collapsed = normal_matrix(&Matrix4::from_scale(0.0));
    assert_relative_eq!(collapsed, cgmath::Matrix3::identity());
}

fn record(model: LightingModel, building: Building) -> RecordingPipeline<FakeGeometry> {
    let mut factory = FakeFactory::default();
    let scene = Scene::build(&mut factory, &Config::default()).unwrap();
    let mut pipeline = RecordingPipeline::new(model);
    let drawn = render_scene(
        &scene.graph,
        &scene.roots(building),
        &params(),
        &Matrix4::identity(),
        &Matrix4::identity(),
        &mut pipeline,
    )
    .unwrap();
    assert_eq!(drawn, pipeline.draws.len());
    pipeline
}

#[test]
fn every_pipeline_receives_the_same_frame() {
    for building in Building::ALL {
        let reference = record(LightingModel::Flat, building);
        for model in [LightingModel::Gouraud, LightingModel::Phong] {
            let other = record(model, building);
            assert_eq!(other.lighting_model(), model);
            assert_eq!(other.bound, reference.bound);
            assert_eq!(other.draws.len(), reference.draws.len());
            for (a, b) in other.draws.iter().zip(&reference.draws) {
                assert_eq!(a.leaf.geometry.label, b.leaf.geometry.label);
                assert_eq!(a.leaf.texture, b.leaf.texture);
                assert_relative_eq!(a.model, b.model);
            }
        }
    }
}

#[test]
fn parameters_are_bound_once_before_drawing() {
    let pipeline = record(LightingModel::Phong, Building::WillisTower);
    assert_eq!(pipeline.bound, [params()]);
    // nine tubes and the floor
    assert_eq!(pipeline.draws.len(), 10);
    assert_eq!(pipeline.draws.last().unwrap().leaf.geometry.label, "floor");
}

#[test]
fn broken_graph_aborts_the_frame() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node("root", Matrix4::identity());
    graph.add_geometry(root, fake_leaf("cube")).unwrap();
    graph.add_child(root, root).unwrap();

    let mut pipeline = RecordingPipeline::new(LightingModel::Gouraud);
    let result = render_scene(
        &graph,
        &[root],
        &params(),
        &Matrix4::identity(),
        &Matrix4::identity(),
        &mut pipeline,
    );
    assert!(matches!(result, Err(StructuralError::Cycle { .. })));
    assert_eq!(pipeline.bound.len(), 1);
}
