use egui::{Context, TopBottomPanel};
use graphics::{EngineUpdates, Scene};
use lin_alg::f32::Vec3;
use log::{error, info};

use crate::{
    cloth::Cloth,
    render::{cloth_mesh, State, MESH_CLOTH},
    wind::WindAxis,
};

pub const ROW_SPACING: f32 = 22.;
pub const COL_SPACING: f32 = 30.;

/// Anchor movement per button press.
const ANCHOR_STEP: f32 = 0.05;

/// This function draws the (immediate-mode) GUI.
/// [UI items](https://docs.rs/egui/latest/egui/struct.Ui.html)
pub fn ui_handler(state: &mut State, ctx: &Context, scene: &mut Scene) -> EngineUpdates {
    let mut engine_updates = EngineUpdates::default();

    TopBottomPanel::top("0").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.add_space(COL_SPACING);

            let wind = state.cloth.wind();
            ui.label(format!("Wind: ({:.1}, {:.1}, {:.1})", wind.x, wind.y, wind.z));

            ui.add_space(COL_SPACING / 2.);
            ui.label("Axis:");
            for axis in [WindAxis::X, WindAxis::Y, WindAxis::Z] {
                ui.selectable_value(&mut state.wind_ctrl.axis, Some(axis), axis.to_str());
            }

            let mut wind = state.cloth.wind();
            if ui.button("+").clicked() {
                state.wind_ctrl.increase(&mut wind);
            }
            if ui.button("−").clicked() {
                state.wind_ctrl.decrease(&mut wind);
            }
            if ui.button("Zero").clicked() {
                state.wind_ctrl.zero(&mut wind);
                info!("Wind zeroed out");
            }
            state.cloth.set_wind(wind);
        });

        ui.add_space(ROW_SPACING / 2.);

        ui.horizontal(|ui| {
            ui.add_space(COL_SPACING);
            ui.label("Move anchors:");

            let moves = [
                ("Up", Vec3::new(0., ANCHOR_STEP, 0.)),
                ("Down", Vec3::new(0., -ANCHOR_STEP, 0.)),
                ("Left", Vec3::new(-ANCHOR_STEP, 0., 0.)),
                ("Right", Vec3::new(ANCHOR_STEP, 0., 0.)),
                ("Near", Vec3::new(0., 0., -ANCHOR_STEP)),
                ("Far", Vec3::new(0., 0., ANCHOR_STEP)),
            ];
            for (label, delta) in moves {
                if ui.button(label).clicked() {
                    state.cloth.translate(delta);
                }
            }

            ui.add_space(COL_SPACING);
            ui.checkbox(&mut state.paused, "Pause");

            if ui.button("Reset").clicked() {
                match Cloth::new(&state.config) {
                    Ok(cloth) => {
                        state.cloth = cloth;
                        scene.meshes[MESH_CLOTH] = cloth_mesh(&state.cloth);
                        engine_updates.meshes = true;
                    }
                    Err(e) => error!("Unable to rebuild the cloth: {e}"),
                }
            }
        });

        ui.add_space(ROW_SPACING / 2.);
    });

    engine_updates
}
