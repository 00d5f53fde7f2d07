use super::node::{NodeIndex, NodeKind, QuadNode, Quadrant, ROOT};
use super::{Config, OutOfBoundsPolicy, QuadTree};
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{Boundable, Rectangle};
use fxhash::FxHashMap;
use tracing::{debug, warn};

// Every node is allocated eagerly, so the leaf count (4^depth) is capped.
pub const MAX_DEPTH_LIMIT: usize = 10;
// Largest whole number an f32 represents exactly.
const MAX_EXACT_DIMENSION: f32 = 16_777_216.0;

fn invalid_config(bounds: &Rectangle, max_depth: usize, reason: &'static str) -> QuadtreeError {
    QuadtreeError::InvalidConfiguration {
        width: bounds.width,
        height: bounds.height,
        max_depth,
        reason,
    }
}

pub(crate) fn validate_config(bounds: &Rectangle, max_depth: usize) -> QuadtreeResult<()> {
    if max_depth > MAX_DEPTH_LIMIT {
        return Err(invalid_config(
            bounds,
            max_depth,
            "max_depth exceeds the supported limit of 10",
        ));
    }
    if !bounds.x.is_finite() || !bounds.y.is_finite() {
        return Err(invalid_config(bounds, max_depth, "bounds origin must be finite"));
    }
    for dimension in [bounds.width, bounds.height] {
        if !dimension.is_finite() || dimension <= 0.0 {
            return Err(invalid_config(
                bounds,
                max_depth,
                "width and height must be finite and positive",
            ));
        }
        if dimension.fract() != 0.0 || dimension > MAX_EXACT_DIMENSION {
            return Err(invalid_config(
                bounds,
                max_depth,
                "width and height must be whole numbers no larger than 2^24",
            ));
        }
        if (dimension as u64) % (1u64 << max_depth) != 0 {
            return Err(invalid_config(
                bounds,
                max_depth,
                "width and height must be divisible by 2^max_depth",
            ));
        }
    }
    Ok(())
}

fn node_count(max_depth: usize) -> usize {
    ((1usize << (2 * (max_depth + 1))) - 1) / 3
}

impl<T: Boundable> QuadTree<T> {
    pub fn new(bounding_box: Rectangle, max_depth: usize) -> QuadtreeResult<Self> {
        Self::new_with_config(
            bounding_box,
            Config {
                max_depth,
                ..Config::default()
            },
        )
    }

    pub fn new_with_config(bounding_box: Rectangle, config: Config) -> QuadtreeResult<Self> {
        validate_config(&bounding_box, config.max_depth)?;
        let max_depth = config.max_depth;

        let mut nodes = Vec::with_capacity(node_count(max_depth));
        nodes.push(QuadNode::new_leaf(
            bounding_box.left(),
            bounding_box.top(),
            bounding_box.width,
            bounding_box.height,
            0,
            None,
        ));

        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let parent = &nodes[index.0];
            if parent.depth == max_depth {
                continue;
            }
            let depth = parent.depth + 1;
            let half_w = parent.width / 2.0;
            let half_h = parent.height / 2.0;
            let origins = Quadrant::ALL.map(|quadrant| (quadrant, parent.child_origin(quadrant)));

            let mut children = [ROOT; 4];
            for (quadrant, (left, top)) in origins {
                let child = NodeIndex(nodes.len());
                nodes.push(QuadNode::new_leaf(
                    left,
                    top,
                    half_w,
                    half_h,
                    depth,
                    Some((index, quadrant)),
                ));
                children[quadrant.index()] = child;
                stack.push(child);
            }
            nodes[index.0].kind = NodeKind::Internal { children };
        }

        debug!(
            left = bounding_box.left(),
            top = bounding_box.top(),
            width = bounding_box.width,
            height = bounding_box.height,
            max_depth,
            nodes = nodes.len(),
            "built quadtree"
        );

        Ok(Self {
            nodes,
            owners: FxHashMap::default(),
            bounds: bounding_box,
            config,
        })
    }

    // One level only. `None` at a leaf.
    pub(crate) fn find_node(&self, node: NodeIndex, x: f32, y: f32) -> Option<NodeIndex> {
        let quad_node = &self.nodes[node.0];
        quad_node
            .children()
            .map(|children| children[quad_node.quadrant_of(x, y).index()])
    }

    pub(crate) fn get_node(&self, x: f32, y: f32) -> NodeIndex {
        let mut node = ROOT;
        while let Some(child) = self.find_node(node, x, y) {
            node = child;
        }
        debug_assert!(self.nodes[node.0].is_leaf());
        debug_assert_eq!(self.nodes[node.0].depth, self.config.max_depth);
        node
    }

    pub(crate) fn resolve_position(&self, item: &T) -> QuadtreeResult<(f32, f32)> {
        let (x, y) = (item.x(), item.y());
        if !x.is_finite() || !y.is_finite() {
            return Err(QuadtreeError::InvalidPosition { x, y });
        }
        if self.bounds.contains_point(x, y) {
            return Ok((x, y));
        }
        match self.config.out_of_bounds {
            OutOfBoundsPolicy::Clamp => {
                let clamped_x = x.clamp(self.bounds.left(), self.bounds.right());
                let clamped_y = y.clamp(self.bounds.top(), self.bounds.bottom());
                warn!(
                    id = ?item.id(),
                    x,
                    y,
                    clamped_x,
                    clamped_y,
                    "element outside quadtree bounds, clamping"
                );
                Ok((clamped_x, clamped_y))
            }
            OutOfBoundsPolicy::Reject => {
                debug!(id = ?item.id(), x, y, "rejecting element outside quadtree bounds");
                Err(QuadtreeError::OutOfBounds {
                    x,
                    y,
                    bounds: self.bounds,
                })
            }
        }
    }

    // Only ever called with an index produced by `get_node` or the owner map.
    pub(crate) fn leaf_bucket_mut(&mut self, leaf: NodeIndex) -> &mut Vec<T::Id> {
        match &mut self.nodes[leaf.0].kind {
            NodeKind::Leaf { bucket } => bucket,
            NodeKind::Internal { .. } => unreachable!("owner map points at an internal node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point(u32, f32, f32);

    impl Boundable for Point {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }

        fn x(&self) -> f32 {
            self.1
        }

        fn y(&self) -> f32 {
            self.2
        }

        fn width(&self) -> f32 {
            0.0
        }

        fn height(&self) -> f32 {
            0.0
        }
    }

    fn tree(max_depth: usize) -> QuadTree<Point> {
        QuadTree::new(Rectangle::from_origin(0.0, 0.0, 64.0, 64.0), max_depth).unwrap()
    }

    #[test]
    fn test_node_count_matches_structure() {
        for depth in 0..4 {
            assert_eq!(tree(depth).nodes.len(), node_count(depth));
        }
        assert_eq!(node_count(1), 5);
        assert_eq!(node_count(2), 21);
    }

    #[test]
    fn test_find_node_single_step() {
        let qt = tree(2);
        let root = &qt.nodes[ROOT.0];
        let children = *root.children().unwrap();

        let nw = qt.find_node(ROOT, 1.0, 1.0).unwrap();
        assert_eq!(nw, children[Quadrant::NorthWest.index()]);
        // One level only: the child is not yet a leaf.
        assert_eq!(qt.nodes[nw.0].depth, 1);
        assert!(!qt.nodes[nw.0].is_leaf());

        assert_eq!(
            qt.find_node(ROOT, 40.0, 1.0),
            Some(children[Quadrant::NorthEast.index()])
        );
        assert_eq!(
            qt.find_node(ROOT, 1.0, 40.0),
            Some(children[Quadrant::SouthWest.index()])
        );
        assert_eq!(
            qt.find_node(ROOT, 40.0, 40.0),
            Some(children[Quadrant::SouthEast.index()])
        );
    }

    #[test]
    fn test_find_node_at_leaf_is_none() {
        let qt = tree(1);
        let leaf = qt.get_node(5.0, 5.0);
        assert!(qt.find_node(leaf, 5.0, 5.0).is_none());
    }

    #[test]
    fn test_midpoint_ties_go_right_and_bottom() {
        let qt = tree(1);
        let children = *qt.nodes[ROOT.0].children().unwrap();
        assert_eq!(
            qt.get_node(32.0, 32.0),
            children[Quadrant::SouthEast.index()]
        );
        assert_eq!(
            qt.get_node(31.9, 32.0),
            children[Quadrant::SouthWest.index()]
        );
        assert_eq!(
            qt.get_node(32.0, 31.9),
            children[Quadrant::NorthEast.index()]
        );
    }

    #[test]
    fn test_get_node_reaches_leaf_region_containing_point() {
        let qt = tree(3);
        for (x, y) in [(0.0, 0.0), (7.9, 8.0), (63.0, 1.0), (64.0, 64.0), (33.5, 17.25)] {
            let leaf = &qt.nodes[qt.get_node(x, y).0];
            assert!(leaf.is_leaf());
            assert_eq!(leaf.depth, 3);
            assert_eq!(leaf.width, 8.0);
            assert!(leaf.bounding_box().contains_point(x, y));
        }
    }

    #[test]
    fn test_children_tile_parent() {
        let qt = tree(2);
        for node in qt.nodes.iter() {
            if let Some(children) = node.children() {
                let area: f32 = children
                    .iter()
                    .map(|child| qt.nodes[child.0].width * qt.nodes[child.0].height)
                    .sum();
                assert_eq!(area, node.width * node.height);
                for child in children {
                    let child = &qt.nodes[child.0];
                    assert!(child.left >= node.left && child.right() <= node.right());
                    assert!(child.top >= node.top && child.bottom() <= node.bottom());
                    assert_eq!(child.depth, node.depth + 1);
                }
            } else {
                assert!(node.bucket().is_some());
            }
        }
    }
}
