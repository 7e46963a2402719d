//! Scene illustrations: animation parameters, SVG construction and rasterization.

pub mod scene;
pub mod svg;

pub use scene::{SceneParams, scene_svg};
pub use svg::{FrameRGBA, SceneRenderer, SvgSceneRenderer};
