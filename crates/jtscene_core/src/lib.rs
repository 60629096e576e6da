//! Public library API for decoding JT scene-graph containers.

/// Container, segment and element decoding plus object-graph resolution.
pub mod jt;
