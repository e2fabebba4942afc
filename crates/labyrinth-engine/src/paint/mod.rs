//! Paint model used by renderers.
//!
//! Colors are linear premultiplied RGBA, matching the renderers'
//! `One, OneMinusSrcAlpha` blend.

mod color;

pub use color::Color;
