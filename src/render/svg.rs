use std::fmt::Write as _;

use kurbo::PathEl;

use crate::assets::color::ColorDef;
use crate::foundation::core::{BezPath, TimeMs};
use crate::foundation::error::{RingscopeError, RingscopeResult};
use crate::scene::model::{ArcLabel, Surface};

/// Paint settings that are not derived from the data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: ColorDef,
    pub axis: ColorDef,
    pub axis_opacity: f64,
    pub label: ColorDef,
    pub font_family: String,
    pub stroke_width: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: ColorDef::rgb(241.0 / 255.0, 245.0 / 255.0, 242.0 / 255.0),
            axis: ColorDef::rgb(178.0 / 255.0, 178.0 / 255.0, 178.0 / 255.0),
            axis_opacity: 0.5,
            label: ColorDef::rgb(72.0 / 255.0, 67.0 / 255.0, 161.0 / 255.0),
            font_family: "sans-serif".to_string(),
            stroke_width: 2.0,
        }
    }
}

/// Serialize the surface as it looks at `now`.
///
/// Output is byte-for-byte reproducible for the same surface, instant and theme.
#[tracing::instrument(skip_all, fields(now = now.0))]
pub fn render_svg(surface: &Surface, now: TimeMs, theme: &Theme) -> RingscopeResult<String> {
    let size = surface
        .size()
        .filter(|s| s.is_measured())
        .ok_or_else(|| RingscopeError::render("surface has no measured size"))?;
    let (w, h) = (size.width, size.height);

    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        num(w),
        num(h),
        num(-w / 2.0),
        num(-h / 2.0),
        num(w),
        num(h)
    );
    out.push('\n');
    let _ = writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
        num(-w / 2.0),
        num(-h / 2.0),
        num(w),
        num(h),
        paint("fill", theme.background)
    );

    write_defs(&mut out, surface);
    let _ = writeln!(out, r#"<g class="zoom" transform="{}">"#, surface.zoom().to_svg());
    write_angular_axis(&mut out, surface, theme);
    write_radial_axis(&mut out, surface, theme);
    write_rings(&mut out, surface, now, theme);
    write_markers(&mut out, surface, now);
    out.push_str("</g>\n</svg>\n");
    Ok(out)
}

fn write_defs(out: &mut String, surface: &Surface) {
    out.push_str("<defs>\n");
    for tick in &surface.axes().angular {
        for label in [&tick.inner_label, &tick.outer_label] {
            let _ = writeln!(
                out,
                r#"<path id="{}" d="{}"/>"#,
                escape(&label.id),
                path_data(&label.baseline)
            );
        }
    }
    out.push_str("</defs>\n");
}

fn write_angular_axis(out: &mut String, surface: &Surface, theme: &Theme) {
    let _ = writeln!(
        out,
        r#"<g class="a axis" fill="none"{} stroke-opacity="{}">"#,
        paint("stroke", theme.axis),
        num(theme.axis_opacity)
    );
    for tick in &surface.axes().angular {
        let _ = writeln!(
            out,
            r#"<path d="{}" stroke-dasharray="4 4"/>"#,
            path_data(&tick.guide)
        );
        write_label(out, &tick.inner_label, theme);
        write_label(out, &tick.outer_label, theme);
    }
    out.push_str("</g>\n");
}

fn write_label(out: &mut String, label: &ArcLabel, theme: &Theme) {
    if label.text.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        r##"<text stroke="none"{} font-family="{}" font-size="{}"><textPath xlink:href="#{}" startOffset="{}">{}</textPath></text>"##,
        paint("fill", theme.label),
        escape(&theme.font_family),
        num(label.font_size),
        escape(&label.id),
        num(label.start_offset),
        escape(&label.text)
    );
}

fn write_radial_axis(out: &mut String, surface: &Surface, theme: &Theme) {
    let _ = writeln!(
        out,
        r#"<g class="r axis" fill="none"{} stroke-opacity="{}" stroke-dasharray="4">"#,
        paint("stroke", theme.axis),
        num(theme.axis_opacity)
    );
    for r in &surface.axes().circles {
        let _ = writeln!(out, r#"<circle r="{}"/>"#, num(*r));
    }
    out.push_str("</g>\n");
}

fn write_rings(out: &mut String, surface: &Surface, now: TimeMs, theme: &Theme) {
    let _ = writeln!(
        out,
        r#"<g class="rings" fill="none" stroke-width="{}">"#,
        num(theme.stroke_width)
    );
    for ring in surface.rings() {
        let Some(path) = ring.path_at(now) else {
            continue;
        };
        let _ = writeln!(
            out,
            r#"<path class="ring" data-ring="{}" d="{}"{} stroke-opacity="{}"/>"#,
            ring.ring,
            path_data(&path),
            paint("stroke", ring.stroke),
            num(ring.opacity_at(now) * ring.stroke.a)
        );
    }
    out.push_str("</g>\n");
}

fn write_markers(out: &mut String, surface: &Surface, now: TimeMs) {
    out.push_str("<g class=\"points\">\n");
    for (ring, group) in surface.marker_groups().iter().enumerate() {
        let Some(first) = group.first() else {
            continue;
        };
        let _ = writeln!(
            out,
            r#"<g class="ring-points" data-ring="{ring}"{}>"#,
            paint("fill", first.fill)
        );
        for m in group {
            let c = m.center_at(now);
            let _ = writeln!(
                out,
                r#"<circle data-id="{}" cx="{}" cy="{}" r="{}" opacity="{}"/>"#,
                m.datum.id,
                num(c.x),
                num(c.y),
                num(m.radius),
                num(m.opacity_at(now) * m.fill.a)
            );
        }
        out.push_str("</g>\n");
    }
    out.push_str("</g>\n");
}

/// `name="#rrggbb"` with a leading space.
fn paint(name: &str, color: ColorDef) -> String {
    format!(r#" {name}="{}""#, color.to_hex_rgb())
}

/// Fixed three-decimal formatting with trailing zeros and negative zero removed.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let r = (v * 1000.0).round() / 1000.0 + 0.0;
    format!("{r}")
}

/// SVG path data for `path`.
pub(crate) fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{},{}", num(p.x), num(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{},{}", num(p.x), num(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(d, "Q{},{} {},{}", num(p1.x), num(p1.y), num(p2.x), num(p2.y));
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C{},{} {},{} {},{}",
                    num(p1.x),
                    num(p1.y),
                    num(p2.x),
                    num(p2.y),
                    num(p3.x),
                    num(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
