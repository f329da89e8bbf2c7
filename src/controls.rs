//! Keyboard handling.
//!
//! Key presses become [`Command`]s. Selections are kept by the
//! [`Controller`] and read once per frame as an immutable [`FrameConfig`], so
//! nothing downstream looks at input state directly.

use winit::keyboard::KeyCode;

use crate::{
    camera::{ProjectionKind, ViewPreset},
    models::Building,
    pipelines::LightingModel,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Lighting(LightingModel),
    Projection(ProjectionKind),
    View(ViewPreset),
    Building(Building),
    ToggleDayNight,
    Exit,
}

/// Key bindings of the application.
pub fn command_for(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Digit7 => Command::Lighting(LightingModel::Flat),
        KeyCode::Digit8 => Command::Lighting(LightingModel::Gouraud),
        KeyCode::Digit9 => Command::Lighting(LightingModel::Phong),
        KeyCode::KeyP => Command::Projection(ProjectionKind::Perspective),
        KeyCode::KeyO => Command::Projection(ProjectionKind::Orthographic),
        KeyCode::Digit1 => Command::View(ViewPreset::Front),
        KeyCode::Digit2 => Command::View(ViewPreset::Orbit),
        KeyCode::Digit3 => Command::View(ViewPreset::Oblique),
        KeyCode::Digit4 => Command::View(ViewPreset::Top),
        KeyCode::Digit5 => Command::View(ViewPreset::OrbitLevel),
        KeyCode::KeyL => Command::ToggleDayNight,
        KeyCode::KeyW => Command::Building(Building::WillisTower),
        KeyCode::KeyE => Command::Building(Building::EmpireState),
        KeyCode::KeyB => Command::Building(Building::BurjAlArab),
        KeyCode::Escape => Command::Exit,
        _ => return None,
    };
    Some(command)
}

/// Everything a frame needs to know about the user's selections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameConfig {
    pub lighting: LightingModel,
    pub projection: ProjectionKind,
    pub view: ViewPreset,
    pub building: Building,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Held {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

#[derive(Debug, Default)]
pub struct Controller {
    selection: FrameConfig,
    held: Held,
}

impl Controller {
    pub fn new(selection: FrameConfig) -> Self {
        Self {
            selection,
            held: Held::default(),
        }
    }

    /// Tracks held arrow keys and applies selection commands on press.
    ///
    /// Returns the command of a freshly pressed key. Toggles and exit are
    /// left to the caller.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<Command> {
        match key {
            KeyCode::ArrowLeft => self.held.left = pressed,
            KeyCode::ArrowRight => self.held.right = pressed,
            KeyCode::ArrowUp => self.held.up = pressed,
            KeyCode::ArrowDown => self.held.down = pressed,
            _ => {}
        }
        if !pressed {
            return None;
        }
        let command = command_for(key)?;
        match command {
            Command::Lighting(model) => self.selection.lighting = model,
            Command::Projection(kind) => self.selection.projection = kind,
            Command::View(preset) => self.selection.view = preset,
            Command::Building(building) => {
                self.selection.building = building;
                log::info!("showing {}", building.label());
            }
            Command::ToggleDayNight | Command::Exit => {}
        }
        Some(command)
    }

    pub fn frame_config(&self) -> FrameConfig {
        self.selection
    }

    /// -1 turning left, 1 turning right, 0 for neither or both.
    pub fn turn(&self) -> f32 {
        axis(self.held.left, self.held.right)
    }

    pub fn climb(&self) -> f32 {
        axis(self.held.down, self.held.up)
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}
