//! Gradient layer descriptors.
//!
//! A [`GradientLayer`] is pure data assembly: authored colors are resolved to
//! their linear premultiplied form and carried together with optional stop
//! locations, unit-space endpoints, and the gradient kind. Rendering and
//! validation are a renderer's concern at draw time.

use serde::{Deserialize, Serialize};

use crate::color::{Color, LinearColor};

/// A point in the unit coordinate space of a layer: `(0, 0)` is the top-left
/// corner, `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPoint {
    pub x: f64,
    pub y: f64,
}

impl UnitPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How gradient colors are spread between the endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Linear interpolation along the start→end axis.
    #[default]
    Axial,
    /// Radial spread from the start point out to the end point.
    Radial,
    /// Angular sweep around the start point.
    Conic,
}

/// A gradient layer descriptor.
///
/// Defaults mirror a top-to-bottom axial gradient: start `(0.5, 0)`, end
/// `(0.5, 1)`, no explicit stop locations (evenly spaced at draw time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientLayer {
    /// Resolved colors, in order.
    pub colors: Vec<LinearColor>,
    /// Optional stop locations in `[0, 1]`, one per color.
    pub locations: Option<Vec<f64>>,
    pub start_point: UnitPoint,
    pub end_point: UnitPoint,
    pub kind: GradientKind,
}

impl Default for GradientLayer {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl GradientLayer {
    /// Create an axial gradient layer from authored colors, with the default
    /// endpoints and no explicit locations.
    pub fn new(colors: &[Color]) -> Self {
        Self {
            colors: colors.iter().map(|c| c.to_linear()).collect(),
            locations: None,
            start_point: UnitPoint::new(0.5, 0.0),
            end_point: UnitPoint::new(0.5, 1.0),
            kind: GradientKind::Axial,
        }
    }

    /// Set explicit stop locations.
    pub fn with_locations(mut self, locations: Vec<f64>) -> Self {
        self.locations = Some(locations);
        self
    }

    /// Set the start and end points in unit space.
    pub fn with_points(mut self, start: UnitPoint, end: UnitPoint) -> Self {
        self.start_point = start;
        self.end_point = end;
        self
    }

    /// Set the gradient kind.
    pub fn with_kind(mut self, kind: GradientKind) -> Self {
        self.kind = kind;
        self
    }
}

static_assertions::assert_impl_all!(GradientLayer: Send, Sync);
