//! This module integrates the cloth with the graphics engine. The cloth is a single mesh, rebuilt from the
//! published positions and normals each frame.

use std::f32::consts::TAU;

use graphics::{
    Camera, ControlScheme, DeviceEvent, EngineUpdates, Entity, InputSettings, LightType, Lighting,
    Mesh, PointLight, Scene, UiLayout, UiSettings, Vertex,
};
use lin_alg::f32::{Quaternion, Vec3};

use crate::{
    cloth::Cloth,
    config::{Config, FLOOR_SIZE},
    ui::ui_handler,
    wind::WindControl,
};

type Color = (f32, f32, f32);

const WINDOW_TITLE: &str = "Cloth";
const WINDOW_SIZE_X: f32 = 1_200.;
const WINDOW_SIZE_Y: f32 = 800.;
const BACKGROUND_COLOR: Color = (0.1, 0.1, 0.1);

const RENDER_DIST: f32 = 100.;

pub const CLOTH_COLOR: Color = (0.8, 0.3, 0.3);
pub const CLOTH_SHINYNESS: f32 = 1.;

pub const FLOOR_COLOR: Color = (0.4, 0.4, 0.45);
pub const FLOOR_SHINYNESS: f32 = 0.2;
const FLOOR_THICKNESS: f32 = 0.02;

// Keep this in sync with mesh init.
pub const MESH_CLOTH: usize = 0;
pub const MESH_FLOOR: usize = 1;

pub struct State {
    pub config: Config,
    pub cloth: Cloth,
    pub wind_ctrl: WindControl,
    pub paused: bool,
}

impl State {
    pub fn new(config: Config, cloth: Cloth) -> Self {
        Self {
            config,
            cloth,
            wind_ctrl: WindControl::default(),
            paused: false,
        }
    }
}

/// Convert the published buffers into a render mesh. Normals are normalized here; the simulation leaves them
/// as raw sums.
pub fn cloth_mesh(cloth: &Cloth) -> Mesh {
    let vertices = cloth
        .posits()
        .iter()
        .zip(cloth.normals())
        .map(|(posit, normal)| {
            let normal = if normal.magnitude() > 0. {
                normal.to_normalized()
            } else {
                Vec3::new(0., 0., 1.)
            };
            Vertex::new([posit.x, posit.y, posit.z], normal)
        })
        .collect();

    Mesh {
        vertices,
        indices: cloth.indices().iter().map(|i| *i as usize).collect(),
        material: 0,
    }
}

fn event_handler(
    _state: &mut State,
    _event: DeviceEvent,
    _scene: &mut Scene,
    _dt: f32,
) -> EngineUpdates {
    EngineUpdates::default()
}

/// This runs each frame: advance the cloth one step, and upload its new geometry.
fn render_handler(state: &mut State, scene: &mut Scene, _dt: f32) -> EngineUpdates {
    let mut engine_updates = EngineUpdates::default();

    if !state.paused {
        state.cloth.step();
        scene.meshes[MESH_CLOTH] = cloth_mesh(&state.cloth);
        engine_updates.meshes = true;
    }

    engine_updates
}

/// Entry point to our render and event loop.
pub fn render(state: State) {
    let floor_y = state.cloth.floor_height() - FLOOR_THICKNESS / 2.;

    let entities = vec![
        Entity::new(
            MESH_CLOTH,
            Vec3::new_zero(),
            Quaternion::new_identity(),
            1.,
            CLOTH_COLOR,
            CLOTH_SHINYNESS,
        ),
        Entity::new(
            MESH_FLOOR,
            Vec3::new(0., floor_y, 0.),
            Quaternion::new_identity(),
            1.,
            FLOOR_COLOR,
            FLOOR_SHINYNESS,
        ),
    ];

    let scene = Scene {
        meshes: vec![
            cloth_mesh(&state.cloth),
            Mesh::new_box(FLOOR_SIZE, FLOOR_THICKNESS, FLOOR_SIZE),
        ],
        entities,
        camera: Camera {
            fov_y: TAU / 8.,
            position: Vec3::new(0., 0.5, -4.),
            far: RENDER_DIST,
            near: 0.05,
            orientation: Quaternion::from_axis_angle(Vec3::new(1., 0., 0.), 0.),
            ..Default::default()
        },
        lighting: Lighting {
            ambient_color: [-1., 1., 1., 0.5],
            ambient_intensity: 0.05,
            point_lights: vec![
                // Light from above and in front.
                PointLight {
                    type_: LightType::Omnidirectional,
                    position: Vec3::new(2., 5., -5.),
                    diffuse_color: [0.3, 0.4, 0.5, 1.],
                    specular_color: [0.3, 0.4, 0.5, 1.],
                    diffuse_intensity: 50.,
                    specular_intensity: 100.,
                },
                // Light from behind, so the back face isn't black.
                PointLight {
                    type_: LightType::Omnidirectional,
                    position: Vec3::new(-2., 5., 5.),
                    diffuse_color: [0.3, 0.4, 0.5, 1.],
                    specular_color: [0.3, 0.4, 0.5, 1.],
                    diffuse_intensity: 50.,
                    specular_intensity: 100.,
                },
            ],
        },
        background_color: BACKGROUND_COLOR,
        window_size: (WINDOW_SIZE_X, WINDOW_SIZE_Y),
        window_title: WINDOW_TITLE.to_owned(),
    };

    let input_settings = InputSettings {
        initial_controls: ControlScheme::FreeCamera,
        move_sens: 1.5,
        ..Default::default()
    };
    let ui_settings = UiSettings {
        layout: UiLayout::Top,
        icon_path: None,
    };

    graphics::run(
        state,
        scene,
        input_settings,
        ui_settings,
        render_handler,
        event_handler,
        ui_handler,
    );
}
