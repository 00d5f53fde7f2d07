use super::node::{NodeIndex, NodeKind, Quadrant, ROOT};
use super::{Config, QuadTree};
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{Boundable, Rectangle};
use tracing::{debug, trace};

impl<T: Boundable> QuadTree<T> {
    /// Inserting an id that is already tracked moves it instead of adding a
    /// second entry. If the position is rejected, any previous entry is left
    /// as it was.
    pub fn insert(&mut self, item: &T) -> QuadtreeResult<()> {
        let (x, y) = self.resolve_position(item)?;
        let leaf = self.get_node(x, y);
        self.file_under(item.id(), leaf);
        Ok(())
    }

    // Looks up the leaf the entry was last filed under, not the current position.
    pub fn remove(&mut self, item: &T) -> bool {
        self.remove_id(item.id())
    }

    pub fn remove_id(&mut self, id: T::Id) -> bool {
        let Some(leaf) = self.owners.remove(&id) else {
            return false;
        };
        let bucket = self.leaf_bucket_mut(leaf);
        if let Some(position) = bucket.iter().position(|other| *other == id) {
            bucket.remove(position);
        }
        trace!(?id, leaf = leaf.0, "removed element");
        true
    }

    /// If the new position is rejected the element is no longer tracked and
    /// the error is returned.
    pub fn update(&mut self, item: &T) -> QuadtreeResult<()> {
        match self.resolve_position(item) {
            Ok((x, y)) => {
                let leaf = self.get_node(x, y);
                self.file_under(item.id(), leaf);
                Ok(())
            }
            Err(err) => {
                self.remove_id(item.id());
                Err(err)
            }
        }
    }

    pub fn update_all<'a, I>(&mut self, items: I) -> QuadtreeResult<()>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for item in items {
            self.update(item)?;
        }
        Ok(())
    }

    /// Only the leaf owning `item`'s current center is examined: an element
    /// just across a quadrant boundary is never returned.
    pub fn retrieve(&self, item: &T) -> QuadtreeResult<Vec<T::Id>> {
        let (x, y) = self.resolve_position(item)?;
        let id = item.id();
        let leaf = &self.nodes[self.get_node(x, y).0];
        Ok(leaf
            .bucket()
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|other| *other != id)
            .collect())
    }

    // Every leaf the bounding box grown by `padding` touches. Always a
    // superset of `retrieve`.
    pub fn retrieve_padded(&self, item: &T, padding: f32) -> QuadtreeResult<Vec<T::Id>> {
        self.resolve_position(item)?;
        let query = item.bounding_box().inflate(padding);
        if !query.width.is_finite()
            || !query.height.is_finite()
            || query.width < 0.0
            || query.height < 0.0
        {
            return Err(QuadtreeError::InvalidExtents {
                width: query.width,
                height: query.height,
            });
        }

        let left = query.left().clamp(self.bounds.left(), self.bounds.right());
        let right = query.right().clamp(self.bounds.left(), self.bounds.right());
        let top = query.top().clamp(self.bounds.top(), self.bounds.bottom());
        let bottom = query.bottom().clamp(self.bounds.top(), self.bounds.bottom());

        let id = item.id();
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index.0];
            match &node.kind {
                NodeKind::Leaf { bucket } => {
                    out.extend(bucket.iter().copied().filter(|other| *other != id));
                }
                NodeKind::Internal { children } => {
                    // Reverse so leaves are visited in quadrant order.
                    for child in children.iter().rev() {
                        if self.nodes[child.0].touches(left, top, right, bottom) {
                            stack.push(*child);
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    pub fn clear(&mut self) {
        for node in self.nodes.iter_mut() {
            if let NodeKind::Leaf { bucket } = &mut node.kind {
                bucket.clear();
            }
        }
        debug!(removed = self.owners.len(), "cleared quadtree");
        self.owners.clear();
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn leaf_count(&self) -> usize {
        1 << (2 * self.config.max_depth)
    }

    pub fn leaf_bounds(&self, item: &T) -> QuadtreeResult<Rectangle> {
        let (x, y) = self.resolve_position(item)?;
        Ok(self.nodes[self.get_node(x, y).0].bounding_box())
    }

    // Empty when the root is the only leaf.
    pub fn leaf_path(&self, item: &T) -> QuadtreeResult<Vec<Quadrant>> {
        let (x, y) = self.resolve_position(item)?;
        let mut path = Vec::with_capacity(self.config.max_depth);
        let mut node = &self.nodes[self.get_node(x, y).0];
        while let (Some(parent), Some(quadrant)) = (node.parent, node.quadrant) {
            path.push(quadrant);
            node = &self.nodes[parent.0];
        }
        path.reverse();
        Ok(path)
    }

    pub fn all_node_bounding_boxes(&self, bounding_boxes: &mut Vec<Rectangle>) {
        bounding_boxes.extend(self.nodes.iter().map(|node| node.bounding_box()));
    }

    pub fn all_leaf_buckets(&self) -> impl Iterator<Item = (Rectangle, &[T::Id])> + '_ {
        self.nodes.iter().filter_map(|node| match node.bucket() {
            Some(bucket) if !bucket.is_empty() => Some((node.bounding_box(), bucket)),
            _ => None,
        })
    }

    fn file_under(&mut self, id: T::Id, leaf: NodeIndex) {
        if self.owners.get(&id) == Some(&leaf) {
            return;
        }
        self.remove_id(id);
        self.leaf_bucket_mut(leaf).push(id);
        self.owners.insert(id, leaf);
        trace!(?id, leaf = leaf.0, "filed element");
    }
}
