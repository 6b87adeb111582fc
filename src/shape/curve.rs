use std::str::FromStr;

use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{RingscopeError, RingscopeResult};

const EPSILON: f64 = 1e-12;
const BUNDLE_BETA: f64 = 0.85;
const CARDINAL_TENSION: f64 = 0.0;
const CATMULL_ROM_ALPHA: f64 = 0.5;

/// Interpolation curve used to draw a ring through its control points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// Open uniform cubic B-spline.
    Basis,
    /// Closed uniform cubic B-spline.
    BasisClosed,
    /// B-spline straightened toward the chord between the first and last point.
    Bundle,
    /// Open cardinal spline.
    Cardinal,
    /// Closed cardinal spline.
    CardinalClosed,
    /// Closed centripetal Catmull–Rom spline.
    CatmullRomClosed,
    /// Closed polyline.
    LinearClosed,
    /// Piecewise constant, stepping at the midpoint between points.
    Step,
    /// Piecewise constant, stepping at each point's x.
    StepAfter,
}

impl CurveKind {
    /// Every curve, in control-panel order.
    pub const ALL: [CurveKind; 9] = [
        CurveKind::Basis,
        CurveKind::BasisClosed,
        CurveKind::Bundle,
        CurveKind::Cardinal,
        CurveKind::CardinalClosed,
        CurveKind::CatmullRomClosed,
        CurveKind::LinearClosed,
        CurveKind::Step,
        CurveKind::StepAfter,
    ];

    /// Control-panel label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Basis => "curveBasis",
            Self::BasisClosed => "curveBasisClosed",
            Self::Bundle => "curveBundle",
            Self::Cardinal => "curveCardinal",
            Self::CardinalClosed => "curveCardinalClosed",
            Self::CatmullRomClosed => "curveCatmullRomClosed",
            Self::LinearClosed => "curveLinearClosed",
            Self::Step => "curveStep",
            Self::StepAfter => "curveStepAfter",
        }
    }

    /// Curve at `index` in [`CurveKind::ALL`].
    pub fn from_index(index: usize) -> RingscopeResult<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            RingscopeError::validation(format!("curve index {index} out of range 0..9"))
        })
    }

    /// Draw the curve through `points`. Returns `None` when nothing would be drawn.
    pub fn path(self, points: impl IntoIterator<Item = Point>) -> Option<BezPath> {
        let mut out = BezPath::new();
        let mut curve: Box<dyn Curve> = match self {
            Self::Basis => Box::new(Basis::default()),
            Self::BasisClosed => Box::new(BasisClosed::default()),
            Self::Bundle => Box::new(Bundle::new(BUNDLE_BETA)),
            Self::Cardinal => Box::new(Cardinal::new(CARDINAL_TENSION)),
            Self::CardinalClosed => Box::new(CardinalClosed::new(CARDINAL_TENSION)),
            Self::CatmullRomClosed => Box::new(CatmullRomClosed::new(CATMULL_ROM_ALPHA)),
            Self::LinearClosed => Box::new(LinearClosed::default()),
            Self::Step => Box::new(Step::new(0.5)),
            Self::StepAfter => Box::new(Step::new(1.0)),
        };
        for p in points {
            curve.point(&mut out, p);
        }
        curve.line_end(&mut out);

        if out.elements().is_empty() {
            None
        } else {
            Some(out)
        }
    }
}

impl FromStr for CurveKind {
    type Err = RingscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let norm = norm.strip_prefix("curve").unwrap_or(&norm);
        Ok(match norm {
            "basis" => Self::Basis,
            "basisclosed" => Self::BasisClosed,
            "bundle" => Self::Bundle,
            "cardinal" => Self::Cardinal,
            "cardinalclosed" => Self::CardinalClosed,
            "catmullromclosed" => Self::CatmullRomClosed,
            "linearclosed" => Self::LinearClosed,
            "step" => Self::Step,
            "stepafter" => Self::StepAfter,
            _ => {
                return Err(RingscopeError::validation(format!(
                    "unknown curve '{}'",
                    s.trim()
                )));
            }
        })
    }
}

/// Streaming curve state machine: points in, path segments out.
trait Curve {
    fn point(&mut self, out: &mut BezPath, p: Point);
    fn line_end(&mut self, out: &mut BezPath);
}

fn v(p: Point) -> Vec2 {
    p.to_vec2()
}

#[derive(Default)]
struct LinearClosed {
    count: usize,
}

impl Curve for LinearClosed {
    fn point(&mut self, out: &mut BezPath, p: Point) {
        if self.count == 0 {
            out.move_to(p);
        } else {
            out.line_to(p);
        }
        self.count += 1;
    }

    fn line_end(&mut self, out: &mut BezPath) {
        if self.count > 0 {
            out.close_path();
        }
    }
}

struct Step {
    t: f64,
    prev: Point,
    count: u8,
}

impl Step {
    fn new(t: f64) -> Self {
        Self {
            t,
            prev: Point::ORIGIN,
            count: 0,
        }
    }
}

impl Curve for Step {
    fn point(&mut self, out: &mut BezPath, p: Point) {
        if self.count == 0 {
            self.count = 1;
            out.move_to(p);
        } else {
            self.count = 2;
            if self.t <= 0.0 {
                out.line_to((self.prev.x, p.y));
                out.line_to(p);
            } else {
                let x1 = self.prev.x * (1.0 - self.t) + p.x * self.t;
                out.line_to((x1, self.prev.y));
                out.line_to((x1, p.y));
            }
        }
        self.prev = p;
    }

    fn line_end(&mut self, out: &mut BezPath) {
        if 0.0 < self.t && self.t < 1.0 && self.count == 2 {
            out.line_to(self.prev);
        }
        if self.count == 1 {
            out.close_path();
        }
    }
}

#[derive(Default)]
struct Basis {
    p0: Point,
    p1: Point,
    count: u8,
}

impl Basis {
    fn segment(&self, out: &mut BezPath, p: Point) {
        let (a, b) = (v(self.p0), v(self.p1));
        out.curve_to(
            ((2.0 * a + b) / 3.0).to_point(),
            ((a + 2.0 * b) / 3.0).to_point(),
            ((a + 4.0 * b + v(p)) / 6.0).to_point(),
        );
    }
}

impl Curve for Basis {
    fn point(&mut self, out: &mut BezPath, p: Point) {
        match self.count {
            0 => {
                self.count = 1;
                out.move_to(p);
            }
            1 => self.count = 2,
            2 => {
                self.count = 3;
                out.line_to(((5.0 * v(self.p0) + v(self.p1)) / 6.0).to_point());
                self.segment(out, p);
            }
            _ => self.segment(out, p),
        }
        self.p0 = self.p1;
        self.p1 = p;
    }

    fn line_end(&mut self, out: &mut BezPath) {
        match self.count {
            3 => {
                self.segment(out, self.p1);
                out.line_to(self.p1);
            }
            2 => out.line_to(self.p1),
            1 => out.close_path(),
            _ => {}
        }
    }
}

#[derive(Default)]
struct BasisClosed {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    count: u8,
}

impl Curve for BasisClosed {
    fn point(&mut self, out: &mut BezPath, p: Point) {
        match self.count {
            0 => {
                self.count = 1;
                self.p2 = p;
            }
            1 => {
                self.count = 2;
                self.p3 = p;
            }
            2 => {
                self.count = 3;
                self.p4 = p;
                out.move_to(((v(self.p0) + 4.0 * v(self.p1) + v(p)) / 6.0).to_point());
            }
            _ => {
                let (a, b) = (v(self.p0), v(self.p1));
                out.curve_to(
                    ((2.0 * a + b) / 3.0).to_point(),
                    ((a + 2.0 * b) / 3.0).to_point(),
                    ((a + 4.0 * b + v(p)) / 6.0).to_point(),
                );
            }
        }
        self.p0 = self.p1;
        self.p1 = p;
    }

    fn line_end(&mut self, out: &mut BezPath) {
        match self.count {
            1 => {
                out.move_to(self.p2);
                out.close_path();
            }
            2 => {
                let (a, b) = (v(self.p2), v(self.p3));
                out.move_to(((a + 2.0 * b) / 3.0).to_point());
                out.line_to(((b + 2.0 * a) / 3.0).to_point());
                out.close_path();
            }
            3 => {
                let (p2, p3, p4) = (self.p2, self.p3, self.p4);
                self.point(out, p2);
                self.point(out, p3);
                self.point(out, p4);
            }
            _ => {}
        }
    }
}

struct Bundle {
    beta: f64,
    points: Vec<Point>,
}

impl Bundle {
    fn new(beta: f64) -> Self {
        Self {
            beta,
            points: Vec::new(),
        }
    }
}

impl Curve for Bundle {
    fn point(&mut self, _out: &mut BezPath, p: Point) {
        self.points.push(p);
    }

    fn line_end(&mut self, out: &mut BezPath) {
        let mut basis = Basis::default();
        let pts = std::mem::take(&mut self.points);
        if pts.len() > 1 {
            let j = (pts.len() - 1) as f64;
            let first = v(pts[0]);
            let delta = v(pts[pts.len() - 1]) - first;
            for (i, p) in pts.iter().enumerate() {
                let t = i as f64 / j;
                let straight = first + t * delta;
                let bent = self.beta * v(*p) + (1.0 - self.beta) * straight;
                basis.point(out, bent.to_point());
            }
        }
        basis.line_end(out);
    }
}

struct Cardinal {
    k: f64,
    p0: Point,
    p1: Point,
    p2: Point,
    count: u8,
}

impl Cardinal {
    fn new(tension: f64) -> Self {
        Self {
            k: (1.0 - tension) / 6.0,
            p0: Point::ORIGIN,
            p1: Point::ORIGIN,
            p2: Point::ORIGIN,
            count: 0,
        }
    }

    fn segment(&self, out: &mut BezPath, p: Point) {
        let (a, b, c) = (v(self.p0), v(self.p1), v(self.p2));
        out.curve_to(
            (b + self.k * (c - a)).to_point(),
            (c + self.k * (b - v(p))).to_point(),
            self.p2,
        );
    }
}

impl Curve for Cardinal {
    fn point(&mut self, out: &mut BezPath, p: Point) {
        match self.count {
            0 => {
                self.count = 1;
                out.move_to(p);
            }
            1 => {
                self.count = 2;
                self.p1 = p;
            }
            2 => {
                self.count = 3;
                self.segment(out, p);
            }
            _ => self.segment(out, p),
        }
        self.p0 = self.p1;
        self.p1 = self.p2;
        self.p2 = p;
    }

    fn line_end(&mut self, out: &mut BezPath) {
        match self.count {
            2 => out.line_to(self.p2),
            3 => self.segment(out, self.p1),
            1 => out.close_path(),
            _ => {}
        }
    }
}

struct CardinalClosed {
    k: f64,
    pts: [Point; 6],
    count: u8,
}

impl CardinalClosed {
    fn new(tension: f64) -> Self {
        Self {
            k: (1.0 - tension) / 6.0,
            pts: [Point::ORIGIN; 6],
            count: 0,
        }
    }
}

impl Curve for CardinalClosed {
    fn point(&mut self, out: &mut BezPath, p: Point) {
        match self.count {
            0 => {
                self.count = 1;
                self.pts[3] = p;
            }
            1 => {
                self.count = 2;
                self.pts[4] = p;
                out.move_to(p);
            }
            2 => {
                self.count = 3;
                self.pts[5] = p;
            }
            _ => {
                let (a, b, c) = (v(self.pts[0]), v(self.pts[1]), v(self.pts[2]));
                out.curve_to(
                    (b + self.k * (c - a)).to_point(),
                    (c + self.k * (b - v(p))).to_point(),
                    self.pts[2],
                );
            }
        }
        self.pts[0] = self.pts[1];
        self.pts[1] = self.pts[2];
        self.pts[2] = p;
    }

    fn line_end(&mut self, out: &mut BezPath) {
        let [_, _, _, p3, p4, p5] = self.pts;
        match self.count {
            1 => {
                out.move_to(p3);
                out.close_path();
            }
            2 => {
                out.line_to(p3);
                out.close_path();
            }
            3 => {
                self.point(out, p3);
                self.point(out, p4);
                self.point(out, p5);
            }
            _ => {}
        }
    }
}

struct CatmullRomClosed {
    alpha: f64,
    pts: [Point; 6],
    // Chord lengths raised to alpha (`_a`) and 2 * alpha (`_2a`).
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
    count: u8,
}

impl CatmullRomClosed {
    fn new(alpha: f64) -> Self {
        Self {
            alpha,
            pts: [Point::ORIGIN; 6],
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
            count: 0,
        }
    }

    fn segment(&self, out: &mut BezPath, p: Point) {
        let (p0, p1, p2) = (v(self.pts[0]), v(self.pts[1]), v(self.pts[2]));
        let mut c1 = p1;
        let mut c2 = p2;

        if self.l01_a > EPSILON {
            let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
            let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
            c1 = (p1 * a - p0 * self.l12_2a + p2 * self.l01_2a) / n;
        }
        if self.l23_a > EPSILON {
            let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
            let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
            c2 = (p2 * b + p1 * self.l23_2a - v(p) * self.l12_2a) / m;
        }

        out.curve_to(c1.to_point(), c2.to_point(), self.pts[2]);
    }
}

impl Curve for CatmullRomClosed {
    fn point(&mut self, out: &mut BezPath, p: Point) {
        if self.count > 0 {
            let d = v(self.pts[2]) - v(p);
            self.l23_2a = d.hypot2().powf(self.alpha);
            self.l23_a = self.l23_2a.sqrt();
        }

        match self.count {
            0 => {
                self.count = 1;
                self.pts[3] = p;
            }
            1 => {
                self.count = 2;
                self.pts[4] = p;
                out.move_to(p);
            }
            2 => {
                self.count = 3;
                self.pts[5] = p;
            }
            _ => self.segment(out, p),
        }

        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;
        self.pts[0] = self.pts[1];
        self.pts[1] = self.pts[2];
        self.pts[2] = p;
    }

    fn line_end(&mut self, out: &mut BezPath) {
        let [_, _, _, p3, p4, p5] = self.pts;
        match self.count {
            1 => {
                out.move_to(p3);
                out.close_path();
            }
            2 => {
                out.line_to(p3);
                out.close_path();
            }
            3 => {
                self.point(out, p3);
                self.point(out, p4);
                self.point(out, p5);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/curve.rs"]
mod tests;
