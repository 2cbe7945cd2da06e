//! Interactive wind adjustment: pick an axis, then nudge that component up or down.

use lin_alg::f32::Vec3;

/// Per key press.
pub const WIND_STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindAxis {
    X,
    Y,
    Z,
}

impl WindAxis {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    fn component(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Self::X => &mut v.x,
            Self::Y => &mut v.y,
            Self::Z => &mut v.z,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WindControl {
    /// Nudges do nothing until an axis is selected.
    pub axis: Option<WindAxis>,
    pub step: f32,
}

impl Default for WindControl {
    fn default() -> Self {
        Self {
            axis: None,
            step: WIND_STEP,
        }
    }
}

impl WindControl {
    pub fn select(&mut self, axis: WindAxis) {
        self.axis = Some(axis);
    }

    pub fn increase(&self, wind: &mut Vec3) {
        self.nudge(wind, self.step);
    }

    pub fn decrease(&self, wind: &mut Vec3) {
        self.nudge(wind, -self.step);
    }

    pub fn zero(&self, wind: &mut Vec3) {
        *wind = Vec3::new_zero();
    }

    fn nudge(&self, wind: &mut Vec3, amount: f32) {
        if let Some(axis) = self.axis {
            *axis.component(wind) += amount;
        }
    }
}
