//! Ringscope is a headless radial chart engine.
//!
//! Concentric rings of data points are projected onto polar axes, kept in a retained scene and
//! animated with explicit tweens on a virtual millisecond clock. A timer-driven simulation
//! mutates the data, and any instant of the scene can be written out as SVG or PNG.
//!
//! - Build a [`Playground`] from a [`PlaygroundConfig`]
//! - Feed it a container size, control inputs and clock advances
//! - Render with [`Playground::render_svg`] or rasterize with [`Rasterizer`]
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod assets;
pub mod chart;
pub mod data;
pub mod playground;
pub mod render;
pub mod scale;
pub mod scene;
pub mod shape;
pub mod sim;
pub mod viewport;

pub use crate::chart::RadialChart;
pub use crate::data::model::{Dataset, MutationRange, Point as DataPoint, Series, generate, mutate};
pub use crate::foundation::core::{Affine, BezPath, Point, Size, TimeMs, Vec2};
pub use crate::foundation::error::{RingscopeError, RingscopeResult};
pub use crate::playground::config::{PlaygroundConfig, mutation_presets};
pub use crate::playground::session::{ControlInput, PanelStatus, Playground};
pub use crate::render::raster::{FrameRGBA, Rasterizer, write_png};
pub use crate::render::svg::Theme;
pub use crate::scene::zoom::{ZoomGesture, ZoomTransform};
pub use crate::shape::curve::CurveKind;
pub use crate::sim::controller::{SimState, SimulationController};
