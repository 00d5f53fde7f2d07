mod api;
mod collisions;
mod config;
mod core;
mod node;

pub use self::core::MAX_DEPTH_LIMIT;
pub use config::{Config, OutOfBoundsPolicy};
pub use node::Quadrant;

use common::shapes::{Boundable, Rectangle};
use fxhash::FxHashMap;
use node::{NodeIndex, QuadNode};

// Positions are read on every call and never cached, so callers must
// `update` after moving an element.
pub struct QuadTree<T: Boundable> {
    nodes: Vec<QuadNode<T::Id>>,
    // Leaf each tracked id was last filed under.
    owners: FxHashMap<T::Id, NodeIndex>,
    bounds: Rectangle,
    config: Config,
}
