/// Easing curves mapping normalized tween progress.
///
/// Names follow the power-curve family used by web motion tooling: `Power1` is quadratic,
/// `Power2` cubic, `Power3` quartic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// Linear progress.
    Linear,
    /// Quadratic ease-in.
    Power1In,
    /// Quadratic ease-out.
    #[default]
    Power1Out,
    /// Quadratic ease-in/out.
    Power1InOut,
    /// Cubic ease-in.
    Power2In,
    /// Cubic ease-out.
    Power2Out,
    /// Cubic ease-in/out.
    Power2InOut,
    /// Quartic ease-in.
    Power3In,
    /// Quartic ease-out.
    Power3Out,
    /// Quartic ease-in/out.
    Power3InOut,
}

impl Ease {
    /// Apply this easing curve to progress `t`, clamped into `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1In => t.powi(2),
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power1InOut => in_out(t, 2),
            Self::Power2In => t.powi(3),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => in_out(t, 3),
            Self::Power3In => t.powi(4),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power3InOut => in_out(t, 4),
        }
    }
}

fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
