use common::shapes::Rectangle;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadtreeError {
    #[error(
        "invalid quadtree configuration (width: {width}, height: {height}, max_depth: {max_depth}): {reason}"
    )]
    InvalidConfiguration {
        width: f32,
        height: f32,
        max_depth: usize,
        reason: &'static str,
    },
    #[error(
        "position ({x}, {y}) is outside quadtree bounds (left: {}, top: {}, right: {}, bottom: {})",
        .bounds.left(),
        .bounds.top(),
        .bounds.right(),
        .bounds.bottom()
    )]
    OutOfBounds { x: f32, y: f32, bounds: Rectangle },
    #[error("position must be finite (x: {x}, y: {y})")]
    InvalidPosition { x: f32, y: f32 },
    #[error("extents must be finite and non-negative (width: {width}, height: {height})")]
    InvalidExtents { width: f32, height: f32 },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
