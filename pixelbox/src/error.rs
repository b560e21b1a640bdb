//! Error types for shape construction and property access.

use thiserror::Error;

use crate::shape::BodyClass;

/// Errors raised by the shape facade.
///
/// Construction errors mean the shape never existed; no engine resources
/// are left behind. Accessor errors signal a programming error at the call
/// site, not a recoverable runtime condition.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A dynamic shape was constructed without material properties.
    #[error("dynamic shapes require a material (density, friction, restitution)")]
    MissingMaterial,

    /// A static or kinematic shape was handed material properties it cannot
    /// carry. These classes have infinite/prescribed motion and no material
    /// identity, so the input is rejected rather than silently dropped.
    #[error("{class:?} shapes cannot carry a material")]
    MaterialNotAllowed {
        /// The classification the caller asked for.
        class: BodyClass,
    },

    /// A density/friction/restitution accessor was called on a shape with
    /// no material-bearing collider (static or kinematic).
    #[error("{class:?} shape has no material to read or write")]
    NoMaterial {
        /// The classification of the offending shape.
        class: BodyClass,
    },

    /// The engine rejected the supplied vertices (fewer than three distinct
    /// points, or all collinear). Surfaced unchanged, never retried.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}
