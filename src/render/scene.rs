use std::f64::consts::PI;

use kurbo::{BezPath, Point, Rect, Size};

use crate::catalog::SceneKey;
use crate::foundation::core::Canvas;
use crate::foundation::math::clamp01;

/// Per-scene animation values derived from scene progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneParams {
    Hallway {
        /// Overhead light brightness multiplier, ~0.6..1.1.
        flicker: f64,
    },
    DoorThreshold {
        /// 0 closed .. 1 ajar; saturates early.
        door_open: f64,
        /// Warm glow opacity, oscillating around 0.25.
        light_intensity: f64,
    },
    RoomInterior {
        pulse: f64,
        red_glow: f64,
    },
    Mirror {
        /// Figure opacity in the glass.
        apparition: f64,
        shimmer: f64,
    },
    Whispers {
        /// Breathing wave in `[-1, 1]`.
        wave: f64,
        /// Opacity of each of the five drifting bands.
        bands: [f64; 5],
    },
    Finale {
        darkness: f64,
        eye_open: f64,
    },
}

impl SceneParams {
    /// Parameters for `key` at `progress` (clamped to `[0, 1]`).
    pub fn at(key: SceneKey, progress: f64) -> Self {
        let p = clamp01(progress);
        match key {
            SceneKey::Hallway => Self::Hallway {
                flicker: 0.6 + (p * PI * 10.0 + p * 4.0).sin().abs() * 0.5,
            },
            SceneKey::DoorThreshold => Self::DoorThreshold {
                door_open: (p * 30.0).clamp(0.0, 1.0),
                light_intensity: 0.25 + (p * PI * 6.0).sin() * 0.12,
            },
            SceneKey::RoomInterior => Self::RoomInterior {
                pulse: 0.8 + (p * PI * 4.0).sin() * 0.1,
                red_glow: (p * 1.8).clamp(0.2, 0.8),
            },
            SceneKey::Mirror => Self::Mirror {
                apparition: (p * 1.6).clamp(0.0, 1.0),
                shimmer: 0.6 + (p * PI * 12.0).sin() * 0.1,
            },
            SceneKey::Whispers => Self::Whispers {
                wave: (p * PI * 8.0).sin(),
                bands: std::array::from_fn(|i| {
                    0.35 + (p * PI * (i as f64 + 1.0) * 1.8).sin() * 0.25
                }),
            },
            SceneKey::Finale => Self::Finale {
                darkness: (p * 1.4).clamp(0.15, 0.9),
                eye_open: ((p - 0.3) * 2.2).clamp(0.0, 1.0),
            },
        }
    }
}

/// Build the SVG document for `key` at `progress` on `canvas`.
pub fn scene_svg(key: SceneKey, progress: f64, canvas: Canvas) -> String {
    let mut svg = Svg::new(canvas);
    match SceneParams::at(key, progress) {
        SceneParams::Hallway { flicker } => hallway(&mut svg, flicker),
        SceneParams::DoorThreshold {
            door_open,
            light_intensity,
        } => door_threshold(&mut svg, door_open, light_intensity),
        SceneParams::RoomInterior { pulse, red_glow } => room_interior(&mut svg, pulse, red_glow),
        SceneParams::Mirror {
            apparition,
            shimmer,
        } => mirror(&mut svg, apparition, shimmer),
        SceneParams::Whispers { wave, bands } => whispers(&mut svg, wave, bands),
        SceneParams::Finale { darkness, eye_open } => finale(&mut svg, darkness, eye_open),
    }
    svg.finish()
}

fn hallway(svg: &mut Svg, flicker: f64) {
    let stage = svg.stage();
    let bg = svg.linear_v(&[(0.05, "#07080d", 1.0), (0.45, "#0b1422", 1.0), (0.85, "#1c0f16", 1.0)]);
    svg.rect(stage, &bg, 1.0);
    svg.brightness(1.1 * flicker);

    let glow = svg.radial(0.5, 0.15, 0.55, &[(0.0, "#ffffd2", 0.08), (1.0, "#ffffd2", 0.0)]);
    svg.rect(stage, &glow, 0.7);

    let floor = svg.linear_v(&[(0.0, "#120b0f", 0.0), (1.0, "#0d080a", 1.0)]);
    svg.rect(sub(stage, 0.1, 0.45, 0.9, 1.0), &floor, 1.0);

    let walls = svg.linear(
        (0.0, 1.0, 1.0, 0.0),
        &[(0.0, "#121822", 1.0), (0.5, "#090d14", 1.0), (1.0, "#04060c", 1.0)],
    );
    svg.rect(sub(stage, 0.2, 0.25, 0.8, 0.8), &walls, 1.0);
    let corridor = svg.linear_v(&[
        (0.0, "#0f141b", 1.0),
        (0.3, "#0f141b", 1.0),
        (0.3, "#07090f", 1.0),
        (1.0, "#07090f", 1.0),
    ]);
    svg.rect(sub(stage, 0.22, 0.28, 0.78, 0.78), &corridor, 1.0);

    let door = sub(stage, 0.41, 0.40, 0.59, 0.84);
    let halo = svg.blur(18.0);
    svg.ellipse_filtered(grow(door, 1.2), "#ff001e", 0.18, &halo);
    let door_fill = svg.linear_v(&[(0.0, "#1a0f13", 1.0), (0.5, "#1c070b", 1.0), (1.0, "#050204", 1.0)]);
    svg.rect(door, &door_fill, 1.0);

    let plaque = sub(door, 0.22, 0.14, 0.78, 0.22);
    svg.stroked_rect(plaque, "#120506", "#4a2a2f");
    svg.text(plaque.center(), plaque.height() * 0.7, "#f3d89b", 0.8, "2 1 3");

    svg.ellipse(sub(door, 0.45, 0.44, 0.55, 0.52), "#d89f4e", 0.8);
}

fn door_threshold(svg: &mut Svg, door_open: f64, light_intensity: f64) {
    let stage = svg.stage();
    let bg = svg.radial(
        0.5,
        0.15,
        0.9,
        &[(0.0, "#ffffff", 0.05), (0.55, "#240c12", 0.8), (1.0, "#040205", 1.0)],
    );
    svg.rect(stage, "#040205", 1.0);
    svg.rect(stage, &bg, 1.0);
    let wash = svg.linear_v(&[(0.0, "#0d0a1b", 1.0), (0.45, "#1a0e17", 1.0), (1.0, "#050107", 1.0)]);
    svg.rect(stage, &wash, 0.75);

    let frame = sub(stage, 0.12, 0.1, 0.88, 0.9);
    let frame_fill = svg.linear(
        (0.0, 1.0, 1.0, 0.0),
        &[(0.0, "#19090d", 1.0), (0.5, "#120406", 1.0), (1.0, "#040103", 1.0)],
    );
    svg.rect(frame, &frame_fill, 1.0);

    // Light spills through the gap as the door swings.
    let spill = svg.radial(0.1, 0.4, 0.5, &[(0.0, "#ffbe8c", 0.18), (1.0, "#ffbe8c", 0.0)]);
    svg.rect(sub(frame, 0.28, 0.1, 0.76, 0.9), &spill, 0.9 * door_open);

    let panel = sub(frame, 0.28, 0.26, 0.76, 0.74);
    let swung = swing_panel(panel, door_open * 18.0_f64.to_radians());
    let panel_fill = svg.linear_v(&[(0.0, "#1a0a0f", 1.0), (0.5, "#0c0305", 1.0), (1.0, "#010002", 1.0)]);
    svg.path(&swung, &panel_fill, 1.0);

    let knob_x = swung_x(panel, door_open * 18.0_f64.to_radians(), 1.0 / 3.0);
    let knob = Rect::from_center_size(
        Point::new(knob_x, panel.y0 + panel.height() * 0.52),
        Size::new(panel.width() * 0.1, panel.height() * 0.12),
    );
    svg.ellipse(knob, "#d7a85f", 0.9);

    svg.rect(sub(frame, 0.12, 0.12, 0.47, 0.88), "#07070b", 0.9);

    let warm = svg.radial(0.48, 0.4, 0.6, &[(0.0, "#ffc8a0", 0.3), (1.0, "#ffc8a0", 0.0)]);
    svg.rect(stage, &warm, light_intensity.max(0.0));
}

/// Door panel hinged on its right edge, swung away from the viewer by `angle`.
fn swing_panel(panel: Rect, angle: f64) -> BezPath {
    let left_x = swung_x(panel, angle, 0.0);
    let depth = panel.width() * angle.sin();
    let k = 800.0 / (800.0 + depth);
    let cy = panel.center().y;
    let half = panel.height() / 2.0 * k;

    let mut path = BezPath::new();
    path.move_to((panel.x1, panel.y0));
    path.line_to((left_x, cy - half));
    path.line_to((left_x, cy + half));
    path.line_to((panel.x1, panel.y1));
    path.close_path();
    path
}

/// Projected x of a point `frac` of the way across the panel from its left edge.
fn swung_x(panel: Rect, angle: f64, frac: f64) -> f64 {
    panel.x1 - panel.width() * (1.0 - frac) * angle.cos()
}

fn room_interior(svg: &mut Svg, pulse: f64, red_glow: f64) {
    let stage = svg.stage();
    svg.rect(stage, "#0a060e", 1.0);
    let bg = svg.radial(0.3, 0.2, 0.6, &[(0.0, "#ffe6aa", 0.12), (1.0, "#0a060e", 0.95)]);
    svg.rect(stage, &bg, 1.0);

    let bed = sub(stage, 0.08, 0.52, 0.92, 0.88);
    svg.rounded(bed, bed.width() * 0.3, "#07060a", 1.0);

    let bench = sub(stage, 0.2, 0.54, 0.8, 0.70);
    let bench_fill = svg.linear(
        (0.0, 0.0, 1.0, 0.0),
        &[(0.0, "#1a1016", 1.0), (0.5, "#270a11", 1.0), (1.0, "#15060e", 1.0)],
    );
    svg.rounded(bench, 24.0, &bench_fill, 1.0);

    let screen = sub(stage, 0.14, 0.44, 0.36, 0.64);
    let screen_fill = svg.linear_v(&[(0.0, "#0b0f18", 1.0), (1.0, "#04060b", 1.0)]);
    svg.rounded(screen, 16.0, &screen_fill, 1.0);
    let glass = svg.linear_v(&[(0.0, "#0c121f", 1.0), (1.0, "#05070e", 1.0)]);
    svg.rounded(sub(screen, 0.08, 0.08, 0.92, 0.92), 12.0, &glass, 1.0);
    let glint = sub(screen, 0.22, 0.22, 0.78, 0.78);
    svg.rounded(glint, glint.width() * 0.4, "#f9f1e0", 0.1 * red_glow);

    let chair = sub(stage, 0.54, 0.48, 0.82, 0.66);
    let soft = svg.blur(22.0);
    svg.ellipse_filtered(grow(chair, 1.3), "#c80a19", 0.12 + red_glow * 0.2, &soft);
    svg.ellipse(chair, "#160a11", 1.0);

    let red = svg.radial(0.8, 0.35, 0.5, &[(0.0, "#ff2828", 0.15), (1.0, "#ff2828", 0.0)]);
    svg.rect(stage, &red, 0.5);

    let form = sub(stage, 0.32, 0.32, 0.68, 0.50);
    svg.ellipse_filtered(grow(form, 1.25), "#ff0000", 0.12 + pulse * 0.08, &soft);
    svg.rounded(form, form.height() * 0.45, "#06060a", 0.8);
    let heart = svg.blur(12.0);
    svg.ellipse_filtered(sub(form, 0.22, 0.22, 0.78, 0.78), "#aa0022", 0.2, &heart);
}

fn mirror(svg: &mut Svg, apparition: f64, shimmer: f64) {
    let stage = svg.stage();
    svg.rect(stage, "#0c0812", 1.0);
    let bg = svg.radial(0.68, 0.35, 0.5, &[(0.0, "#ffffff", 0.06), (1.0, "#0c0812", 0.96)]);
    svg.rect(stage, &bg, 1.0);
    let wash = svg.linear_v(&[(0.0, "#0c060c", 1.0), (0.5, "#140812", 1.0), (1.0, "#030104", 1.0)]);
    svg.rect(stage, &wash, 0.7);

    let glass = sub(stage, 0.48, 0.18, 0.84, 0.76);
    let halo = svg.blur(16.0);
    svg.ellipse_filtered(grow(glass, 1.1), "#ffffff", 0.12, &halo);
    let frame_fill = svg.linear_v(&[(0.0, "#0f111c", 1.0), (0.5, "#090a13", 1.0), (1.0, "#020105", 1.0)]);
    svg.rounded(glass, glass.width() * 0.28, &frame_fill, 1.0);
    svg.rounded_outline(glass, glass.width() * 0.28, "#3a2c44", 0.8);

    let inner = sub(glass, 0.12, 0.12, 0.88, 0.88);
    let inner_fill = svg.linear_v(&[(0.0, "#090c12", 1.0), (0.5, "#040509", 1.0), (1.0, "#010102", 1.0)]);
    svg.rounded(inner, inner.width() * 0.26, &inner_fill, 1.0);

    let mist = grow(sub(glass, 0.18, 0.18, 0.82, 0.82), 1.0 + apparition * 0.06);
    let mist_fill = svg.radial(0.5, 0.3, 0.7, &[(0.0, "#ffffff", 0.08), (1.0, "#ffffff", 0.0)]);
    svg.rounded(mist, mist.width() * 0.3, &mist_fill, 0.7);

    if apparition > 0.0 {
        let figure = sub(glass, 0.2, 0.2, 0.8, 0.8);
        let haze = svg.blur(4.0);
        svg.group_begin(apparition);
        svg.ellipse_filtered(sub(figure, 0.31, 0.24, 0.69, 0.36), "#fce4ef", 0.06, &haze);
        svg.ellipse_filtered(sub(figure, 0.24, 0.42, 0.76, 0.66), "#f7d4e4", 0.08, &haze);
        svg.ellipse_filtered(sub(figure, 0.45, 0.40, 0.61, 0.58), "#f8f1ff", 0.1, &haze);
        svg.ellipse_filtered(sub(figure, 0.42, 0.40, 0.58, 0.58), "#f8f1ff", 0.1, &haze);
        svg.ellipse_filtered(sub(figure, 0.35, 0.58, 0.65, 0.76), "#f8f1ff", 0.08, &haze);
        svg.group_end();
    }

    let sheen = svg.linear(
        (0.0, 0.0, 1.0, 1.0),
        &[(0.0, "#ffffff", 0.06), (0.35, "#ffffff", 0.0), (1.0, "#ffffff", 0.0)],
    );
    svg.rect(grow(stage, 1.0 + shimmer * 0.02), &sheen, 0.35);
}

fn whispers(svg: &mut Svg, wave: f64, bands: [f64; 5]) {
    let stage = svg.stage();
    svg.rect(stage, "#050105", 1.0);
    let bg = svg.radial(0.4, 0.2, 0.55, &[(0.0, "#b40a28", 0.08), (1.0, "#050105", 0.94)]);
    svg.rect(stage, &bg, 1.0);
    let wash = svg.linear(
        (0.0, 0.0, 1.0, 1.0),
        &[(0.0, "#020205", 1.0), (0.45, "#0a040b", 1.0), (1.0, "#050106", 1.0)],
    );
    svg.rect(stage, &wash, 0.9);

    let pulse = svg.radial(0.5, 0.5, 0.55, &[(0.0, "#ff1919", 0.25), (1.0, "#ff1919", 0.0)]);
    svg.rect(grow(stage, 1.0 + wave * 0.03), &pulse, 0.3);

    let smear = svg.blur(14.0);
    for (i, &opacity) in bands.iter().enumerate() {
        let top = 0.2 + i as f64 * 0.12;
        svg.ellipse_filtered(sub(stage, 0.1, top, 0.9, top + 0.12), "#f5d4ff", 0.05 * opacity, &smear);
    }

    let mouth = sub(stage, 0.24, 0.35, 0.76, 0.73);
    let halo = svg.blur(18.0);
    svg.ellipse_filtered(grow(mouth, 1.15), "#ff0014", 0.18, &halo);
    svg.ellipse(mouth, "#040103", 1.0);
    svg.ellipse_filtered(
        sub(mouth, 0.18, 0.18, 0.82, 0.82),
        "#ff0033",
        0.12 * (0.5 + wave * 0.4).max(0.0),
        &smear,
    );
    let ember = svg.blur(2.0);
    svg.ellipse_filtered(sub(mouth, 0.46, 0.39, 0.54, 0.61), "#ffcc88", 0.4, &ember);
}

fn finale(svg: &mut Svg, darkness: f64, eye_open: f64) {
    let stage = svg.stage();
    svg.rect(stage, "#030104", 1.0);
    let bg = svg.radial(0.5, 0.5, 0.7, &[(0.0, "#0c0203", 0.92), (1.0, "#030104", 1.0)]);
    svg.rect(stage, &bg, 1.0);
    svg.rect(stage, "#000000", darkness);

    let head = sub(stage, 0.31, 0.48, 0.69, 0.92);
    let head_fill = svg.linear_v(&[(0.0, "#09020d", 1.0), (0.5, "#050007", 1.0), (1.0, "#000000", 1.0)]);
    svg.rounded(head, head.width() * 0.48, &head_fill, 1.0);
    let inner = sub(head, 0.12, 0.12, 0.88, 0.88);
    let glow = svg.blur(24.0);
    svg.ellipse_filtered(grow(inner, 1.15), "#ff0000", 0.2, &glow);
    svg.rounded(inner, inner.width() * 0.45, "#000000", 1.0);

    let brow_blur = svg.blur(8.0);
    svg.ellipse_filtered(sub(head, 0.32, 0.26, 0.68, 0.42), "#260207", 0.8, &brow_blur);

    let socket = sub(head, 0.26, 0.36, 0.74, 0.60);
    let eye = Rect::from_center_size(
        socket.center(),
        Size::new(socket.width(), socket.height() * (0.1 + eye_open * 0.9)),
    );
    let eye_glow = svg.blur(28.0);
    svg.ellipse_filtered(grow(eye, 1.4), "#ff001e", 0.25, &eye_glow);
    svg.ellipse(eye, "#150108", 0.9);
    svg.ellipse(sub(eye, 0.38, 0.16, 0.62, 0.84), "#ff2b4f", 1.0);
    let spark = svg.blur(3.0);
    svg.ellipse_filtered(grow(sub(eye, 0.455, 0.37, 0.545, 0.63), 1.8), "#ffffff", 0.9, &spark);
    svg.ellipse(sub(eye, 0.455, 0.37, 0.545, 0.63), "#fffffb", 0.95);

    let haze = svg.radial(0.5, 0.48, 0.55, &[(0.0, "#ff0000", 0.4), (1.0, "#ff0000", 0.0)]);
    svg.rect(stage, &haze, 0.2);
}

/// Rectangle at fractional coordinates inside `parent`.
fn sub(parent: Rect, x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
    let (w, h) = (parent.width(), parent.height());
    Rect::new(
        parent.x0 + x0 * w,
        parent.y0 + y0 * h,
        parent.x0 + x1 * w,
        parent.y0 + y1 * h,
    )
}

/// `r` scaled by `factor` about its center.
fn grow(r: Rect, factor: f64) -> Rect {
    Rect::from_center_size(r.center(), r.size() * factor)
}

/// Minimal SVG document writer.
struct Svg {
    canvas: Canvas,
    defs: String,
    body: String,
    next_id: usize,
}

type Stop<'a> = (f64, &'a str, f64);

impl Svg {
    fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            defs: String::new(),
            body: String::new(),
            next_id: 0,
        }
    }

    fn stage(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas.w(), self.canvas.h())
    }

    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn stops(stops: &[Stop<'_>]) -> String {
        stops
            .iter()
            .map(|(offset, color, opacity)| {
                format!(
                    r#"<stop offset="{offset:.3}" stop-color="{color}" stop-opacity="{opacity:.3}"/>"#
                )
            })
            .collect()
    }

    /// Linear gradient in bounding-box units; returns a paint reference.
    fn linear(&mut self, (x1, y1, x2, y2): (f64, f64, f64, f64), stops: &[Stop<'_>]) -> String {
        let id = self.id("lg");
        self.defs.push_str(&format!(
            r#"<linearGradient id="{id}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}">{}</linearGradient>"#,
            Self::stops(stops)
        ));
        format!("url(#{id})")
    }

    fn linear_v(&mut self, stops: &[Stop<'_>]) -> String {
        self.linear((0.0, 0.0, 0.0, 1.0), stops)
    }

    /// Radial gradient centred at fractional `(cx, cy)` with fractional radius `r`.
    fn radial(&mut self, cx: f64, cy: f64, r: f64, stops: &[Stop<'_>]) -> String {
        let id = self.id("rg");
        self.defs.push_str(&format!(
            r#"<radialGradient id="{id}" cx="{cx}" cy="{cy}" r="{r}">{}</radialGradient>"#,
            Self::stops(stops)
        ));
        format!("url(#{id})")
    }

    fn blur(&mut self, std_dev: f64) -> String {
        let id = self.id("bl");
        self.defs.push_str(&format!(
            r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{std_dev:.2}"/></filter>"#
        ));
        format!("url(#{id})")
    }

    fn rect(&mut self, r: Rect, fill: &str, opacity: f64) {
        self.rounded(r, 0.0, fill, opacity);
    }

    fn rounded(&mut self, r: Rect, radius: f64, fill: &str, opacity: f64) {
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{radius:.2}" fill="{fill}" opacity="{:.3}"/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            clamp01(opacity)
        ));
    }

    fn rounded_outline(&mut self, r: Rect, radius: f64, stroke: &str, opacity: f64) {
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{radius:.2}" fill="none" stroke="{stroke}" stroke-width="1.5" opacity="{:.3}"/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            clamp01(opacity)
        ));
    }

    fn stroked_rect(&mut self, r: Rect, fill: &str, stroke: &str) {
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        ));
    }

    fn ellipse(&mut self, r: Rect, fill: &str, opacity: f64) {
        let c = r.center();
        self.body.push_str(&format!(
            r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{fill}" opacity="{:.3}"/>"#,
            c.x,
            c.y,
            r.width() / 2.0,
            r.height() / 2.0,
            clamp01(opacity)
        ));
    }

    fn ellipse_filtered(&mut self, r: Rect, fill: &str, opacity: f64, filter: &str) {
        let c = r.center();
        self.body.push_str(&format!(
            r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{fill}" opacity="{:.3}" filter="{filter}"/>"#,
            c.x,
            c.y,
            r.width() / 2.0,
            r.height() / 2.0,
            clamp01(opacity)
        ));
    }

    fn path(&mut self, path: &BezPath, fill: &str, opacity: f64) {
        self.body.push_str(&format!(
            r#"<path d="{}" fill="{fill}" opacity="{:.3}"/>"#,
            path.to_svg(),
            clamp01(opacity)
        ));
    }

    fn text(&mut self, at: Point, size: f64, fill: &str, opacity: f64, text: &str) {
        self.body.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{size:.2}" letter-spacing="{:.2}" text-anchor="middle" dominant-baseline="central" fill="{fill}" opacity="{:.3}">{text}</text>"#,
            at.x,
            at.y,
            size * 0.35,
            clamp01(opacity)
        ));
    }

    /// Darken (`b < 1`) or lift (`b > 1`) everything drawn so far.
    fn brightness(&mut self, b: f64) {
        let stage = self.stage();
        if b < 1.0 {
            self.rect(stage, "#000000", 1.0 - b);
        } else if b > 1.0 {
            self.rect(stage, "#ffffff", (b - 1.0) * 0.15);
        }
    }

    fn group_begin(&mut self, opacity: f64) {
        self.body
            .push_str(&format!(r#"<g opacity="{:.3}">"#, clamp01(opacity)));
    }

    fn group_end(&mut self) {
        self.body.push_str("</g>");
    }

    fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs>{}</defs>{}</svg>"#,
            self.defs,
            self.body,
            w = self.canvas.width,
            h = self.canvas.height,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
