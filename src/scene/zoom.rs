use crate::foundation::core::{Affine, Point, Vec2};

/// Wheel delta (pixels) to log2 scale factor.
const WHEEL_PIXEL_FACTOR: f64 = 0.002;

/// View transform `p -> p * k + (x, y)` applied to the top-level group.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn to_affine(self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::scale(self.k)
    }

    pub fn apply(self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn invert(self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    pub fn translate_by(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
    }

    /// Rescale to `k` keeping the surface point under `anchor` fixed.
    pub fn scale_to_at(self, k: f64, anchor: Point) -> Self {
        let local = self.invert(anchor);
        Self {
            k,
            x: anchor.x - local.x * k,
            y: anchor.y - local.y * k,
        }
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

/// Pointer gesture in surface (viewBox) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomGesture {
    /// Drag by a pointer delta.
    Pan { delta: Vec2 },
    /// Wheel scroll; positive `delta_y` zooms out.
    Wheel { delta_y: f64, at: Point },
    /// Double click doubles the scale (halves it with shift).
    DoubleClick { at: Point, shift: bool },
    /// Back to identity.
    Reset,
}

/// Pan/zoom behavior with a scale extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBehavior {
    pub min_scale: f64,
    pub max_scale: f64,
    transform: ZoomTransform,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self {
            min_scale: 0.0,
            max_scale: f64::INFINITY,
            transform: ZoomTransform::IDENTITY,
        }
    }
}

impl ZoomBehavior {
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    fn constrain(&self, k: f64) -> f64 {
        let k = k.clamp(self.min_scale, self.max_scale);
        if k <= 0.0 || !k.is_finite() {
            self.transform.k
        } else {
            k
        }
    }

    /// Apply a gesture; returns the new transform.
    pub fn handle(&mut self, gesture: ZoomGesture) -> ZoomTransform {
        let t = self.transform;
        self.transform = match gesture {
            ZoomGesture::Pan { delta } => t.translate_by(delta),
            ZoomGesture::Wheel { delta_y, at } => {
                let k = self.constrain(t.k * 2f64.powf(-delta_y * WHEEL_PIXEL_FACTOR));
                t.scale_to_at(k, at)
            }
            ZoomGesture::DoubleClick { at, shift } => {
                let factor = if shift { 0.5 } else { 2.0 };
                t.scale_to_at(self.constrain(t.k * factor), at)
            }
            ZoomGesture::Reset => ZoomTransform::IDENTITY,
        };
        self.transform
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/zoom.rs"]
mod tests;
