/// Easing functions mapping normalized transition progress onto eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Identity; the only easing used by the chart transitions.
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SinInOut,
}

impl Ease {
    /// Apply to progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => poly_in(t, 2),
            Self::QuadOut => poly_out(t, 2),
            Self::QuadInOut => poly_in_out(t, 2),
            Self::CubicIn => poly_in(t, 3),
            Self::CubicOut => poly_out(t, 3),
            Self::CubicInOut => poly_in_out(t, 3),
            Self::SinInOut => (1.0 - (std::f64::consts::PI * t).cos()) / 2.0,
        }
    }
}

fn poly_in(t: f64, e: i32) -> f64 {
    t.powi(e)
}

fn poly_out(t: f64, e: i32) -> f64 {
    1.0 - (1.0 - t).powi(e)
}

fn poly_in_out(t: f64, e: i32) -> f64 {
    let t2 = t * 2.0;
    if t2 <= 1.0 {
        t2.powi(e) / 2.0
    } else {
        (2.0 - (2.0 - t2).powi(e)) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
