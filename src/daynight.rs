//! Day/night transitions of the light intensities and the sky colour.
//!
//! A toggle restarts a fixed-length fade towards the other phase. At the
//! start of a fade the parameters equal the phase being left, after
//! [`DURATION`] seconds they equal the phase being entered.

use cgmath::{Point3, Vector3, VectorSpace};

use crate::{models::Building, pipelines::light::LightingParameters};

/// Seconds a full day to night (or night to day) fade takes.
pub const DURATION: f32 = 3.0;

/// `target * t + source * (1 - t)` with `t` clamped to `[0, 1]`.
///
/// The direction of a fade is chosen by the argument order alone.
pub fn interpolate<V>(t: f32, target: V, source: V) -> V
where
    V: VectorSpace<Scalar = f32>,
{
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    target * t + source * (1.0 - t)
}

/// Light intensities and clear colour of one phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseLighting {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub background: Vector3<f32>,
}

impl PhaseLighting {
    fn towards(&self, source: &PhaseLighting, t: f32) -> PhaseLighting {
        PhaseLighting {
            ambient: interpolate(t, self.ambient, source.ambient),
            diffuse: interpolate(t, self.diffuse, source.diffuse),
            specular: interpolate(t, self.specular, source.specular),
            background: interpolate(t, self.background, source.background),
        }
    }

    pub fn clear_colour(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.background.x as f64,
            g: self.background.y as f64,
            b: self.background.z as f64,
            a: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingPreset {
    pub day: PhaseLighting,
    pub night: PhaseLighting,
}

const fn rgb(r: f32, g: f32, b: f32) -> Vector3<f32> {
    Vector3::new(r / 255.0, g / 255.0, b / 255.0)
}

const SKY_DAY: PhaseLighting = PhaseLighting {
    ambient: Vector3::new(0.9, 0.94, 0.96),
    diffuse: Vector3::new(1.0, 1.0, 1.0),
    specular: Vector3::new(1.0, 1.0, 1.0),
    background: rgb(135.0, 206.0, 235.0),
};

const SKY_NIGHT: PhaseLighting = PhaseLighting {
    ambient: Vector3::new(0.2, 0.2, 0.3),
    diffuse: Vector3::new(0.3, 0.3, 0.35),
    specular: Vector3::new(0.4, 0.4, 0.4),
    background: rgb(42.0, 42.0, 53.0),
};

const DESERT_DAY: PhaseLighting = PhaseLighting {
    ambient: Vector3::new(0.99, 0.81, 0.27),
    background: rgb(255.0, 229.0, 119.0),
    ..SKY_DAY
};

/// Each building comes with its own tint; the Willis and Empire scenes share one.
pub fn preset(building: Building) -> LightingPreset {
    match building {
        Building::WillisTower | Building::EmpireState => LightingPreset {
            day: SKY_DAY,
            night: SKY_NIGHT,
        },
        Building::BurjAlArab => LightingPreset {
            day: DESERT_DAY,
            night: SKY_NIGHT,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayNightCycle {
    is_day: bool,
    elapsed: f32,
}

impl Default for DayNightCycle {
    /// Day with a fresh fade, so the first seconds brighten from night.
    fn default() -> Self {
        Self::new(true)
    }
}

impl DayNightCycle {
    pub fn new(is_day: bool) -> Self {
        Self {
            is_day,
            elapsed: 0.0,
        }
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Negative or non-finite steps are ignored so `elapsed` never decreases.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn toggle(&mut self) {
        self.is_day = !self.is_day;
        self.elapsed = 0.0;
        log::info!(
            "switching to {}",
            if self.is_day { "day" } else { "night" }
        );
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / DURATION).clamp(0.0, 1.0)
    }

    pub fn blend(&self, preset: &LightingPreset) -> PhaseLighting {
        let (target, source) = if self.is_day {
            (&preset.day, &preset.night)
        } else {
            (&preset.night, &preset.day)
        };
        target.towards(source, self.progress())
    }

    /// Current lighting parameters for the given eye position, clamped into
    /// their valid ranges.
    pub fn parameters(
        &self,
        preset: &LightingPreset,
        view_position: Point3<f32>,
    ) -> (LightingParameters, PhaseLighting) {
        let phase = self.blend(preset);
        let params =
            LightingParameters::new(phase.ambient, phase.diffuse, phase.specular, view_position)
                .sanitized();
        (params, phase)
    }
}
