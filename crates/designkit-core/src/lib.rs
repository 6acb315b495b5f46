//! designkit-core: layer-level drawing primitives for the design kit.
//!
//! Value types only: a 4×4 homogeneous transform ([`Transform3D`]), the 2D
//! affine transform it projects to ([`Affine2D`]), authored and resolved
//! color forms ([`Color`], [`LinearColor`]), and a gradient layer descriptor
//! ([`GradientLayer`]). Every operation is a pure computation on
//! independently owned values; degenerate geometric inputs fall back to
//! documented values instead of failing.

mod affine;
mod color;
mod gradient;
mod transform3d;

pub use affine::Affine2D;
pub use color::{Color, LinearColor};
pub use gradient::{GradientKind, GradientLayer, UnitPoint};
pub use transform3d::Transform3D;
