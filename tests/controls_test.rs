use skyline::{
    camera::{ProjectionKind, ViewPreset},
    controls::{Command, Controller, FrameConfig, command_for},
    models::Building,
    pipelines::LightingModel,
};
use winit::keyboard::KeyCode;

#[test]
fn keys_map_to_commands() {
    assert_eq!(command_for(KeyCode::Digit7), Some(Command::Lighting(LightingModel::Flat)));
    assert_eq!(command_for(KeyCode::Digit8), Some(Command::Lighting(LightingModel::Gouraud)));
    assert_eq!(command_for(KeyCode::Digit9), Some(Command::Lighting(LightingModel::Phong)));
    assert_eq!(command_for(KeyCode::KeyO), Some(Command::Projection(ProjectionKind::Orthographic)));
    assert_eq!(command_for(KeyCode::Digit4), Some(Command::View(ViewPreset::Top)));
    assert_eq!(command_for(KeyCode::KeyE), Some(Command::Building(Building::EmpireState)));
    assert_eq!(command_for(KeyCode::KeyL), Some(Command::ToggleDayNight));
    assert_eq!(command_for(KeyCode::Escape), Some(Command::Exit));
    assert_eq!(command_for(KeyCode::KeyQ), None);
    assert_eq!(command_for(KeyCode::ArrowLeft), None);
}

#[test]
fn presses_update_the_frame_selection() {
    let mut controller = Controller::new(FrameConfig::default());
    controller.handle_key(KeyCode::Digit7, true);
    controller.handle_key(KeyCode::KeyW, true);
    controller.handle_key(KeyCode::Digit1, true);
    controller.handle_key(KeyCode::KeyO, true);

    assert_eq!(
        controller.frame_config(),
        FrameConfig {
            lighting: LightingModel::Flat,
            projection: ProjectionKind::Orthographic,
            view: ViewPreset::Front,
            building: Building::WillisTower,
        }
    );
}

#[test]
fn releases_do_nothing_to_the_selection() {
    let start = FrameConfig::default();
    let mut controller = Controller::new(start);
    assert_eq!(controller.handle_key(KeyCode::Digit8, false), None);
    assert_eq!(controller.handle_key(KeyCode::KeyL, false), None);
    assert_eq!(controller.frame_config(), start);
}

#[test]
fn toggles_are_handed_back_to_the_caller() {
    let start = FrameConfig::default();
    let mut controller = Controller::new(start);
    assert_eq!(controller.handle_key(KeyCode::KeyL, true), Some(Command::ToggleDayNight));
    assert_eq!(controller.handle_key(KeyCode::Escape, true), Some(Command::Exit));
    assert_eq!(controller.frame_config(), start);
}

#[test]
fn arrows_are_tracked_while_held() {
    let mut controller = Controller::default();
    assert_eq!(controller.turn(), 0.0);

    controller.handle_key(KeyCode::ArrowLeft, true);
    controller.handle_key(KeyCode::ArrowUp, true);
    assert_eq!(controller.turn(), -1.0);
    assert_eq!(controller.climb(), 1.0);

    controller.handle_key(KeyCode::ArrowRight, true);
    assert_eq!(controller.turn(), 0.0);

    controller.handle_key(KeyCode::ArrowLeft, false);
    controller.handle_key(KeyCode::ArrowUp, false);
    controller.handle_key(KeyCode::ArrowDown, true);
    assert_eq!(controller.turn(), 1.0);
    assert_eq!(controller.climb(), -1.0);
}
