use std::sync::Arc;

use crate::catalog::SceneKey;
use crate::foundation::core::Canvas;
use crate::foundation::error::{Room213Error, Room213Result};
use crate::render::scene::scene_svg;

/// A rendered frame as premultiplied RGBA8 bytes.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// RGBA at pixel `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Mean of the RGB channels over every pixel, in `[0, 255]`.
    pub fn mean_luma(&self) -> f64 {
        let px = self.data.len() / 4;
        if px == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .data
            .chunks_exact(4)
            .map(|p| u64::from(p[0]) + u64::from(p[1]) + u64::from(p[2]))
            .sum();
        sum as f64 / (px as f64 * 3.0)
    }
}

/// Renders one scene illustration at a given scene progress.
///
/// Implementations must be pure with respect to `(key, progress)` and accept any progress
/// (values outside `[0, 1]` are clamped).
pub trait SceneRenderer {
    fn render(&mut self, key: SceneKey, progress: f64) -> Room213Result<FrameRGBA>;
}

/// CPU scene renderer: builds the scene SVG, parses it with `usvg`, rasterizes with `resvg`.
pub struct SvgSceneRenderer {
    canvas: Canvas,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgSceneRenderer {
    /// Renderer for `canvas`, with system fonts loaded for the door plaque.
    pub fn new(canvas: Canvas) -> Room213Result<Self> {
        canvas.validate()?;
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "scene renderer font database ready");
        Ok(Self {
            canvas,
            fontdb: Arc::new(db),
        })
    }

    /// Output frame size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn parse(&self, svg: &str) -> Room213Result<usvg::Tree> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        usvg::Tree::from_str(svg, &opts)
            .map_err(|e| Room213Error::render(format!("parse scene svg: {e}")))
    }
}

impl SceneRenderer for SvgSceneRenderer {
    fn render(&mut self, key: SceneKey, progress: f64) -> Room213Result<FrameRGBA> {
        let svg = scene_svg(key, progress, self.canvas);
        let tree = self.parse(&svg)?;
        let data = rasterize_svg_to_premul_rgba8(&tree, self.canvas.width, self.canvas.height)?;
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
        })
    }
}

/// Rasterize `tree` scaled to fill `width` x `height`.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> Room213Result<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Room213Error::render("failed to allocate scene pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
