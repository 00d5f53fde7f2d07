use super::QuadTree;
use crate::collision_detection;
use crate::error::QuadtreeResult;
use common::shapes::Boundable;

impl<T: Boundable> QuadTree<T> {
    // Ids `lookup` cannot resolve are skipped.
    pub fn collisions<'a, F>(&self, item: &T, lookup: F) -> QuadtreeResult<Vec<T::Id>>
    where
        F: Fn(T::Id) -> Option<&'a T>,
        T: 'a,
    {
        let mut candidates = self.retrieve(item)?;
        candidates.retain(|id| {
            lookup(*id).is_some_and(|other| collision_detection::overlaps(item, other))
        });
        Ok(candidates)
    }

    pub fn for_each_collision_pair<'a, L, F>(&self, lookup: L, mut f: F)
    where
        L: Fn(T::Id) -> Option<&'a T>,
        F: FnMut(T::Id, T::Id),
        T: 'a,
    {
        let mut resolved: Vec<(T::Id, &'a T)> = Vec::new();
        for (_, bucket) in self.all_leaf_buckets() {
            resolved.clear();
            resolved.extend(bucket.iter().filter_map(|id| lookup(*id).map(|item| (*id, item))));
            for (i, (a_id, a)) in resolved.iter().enumerate() {
                for (b_id, b) in resolved[i + 1..].iter() {
                    if collision_detection::overlaps(*a, *b) {
                        f(*a_id, *b_id);
                    }
                }
            }
        }
    }

    pub fn collision_pairs<'a, L>(&self, lookup: L) -> Vec<(T::Id, T::Id)>
    where
        L: Fn(T::Id) -> Option<&'a T>,
        T: 'a,
    {
        let mut pairs = Vec::new();
        self.for_each_collision_pair(lookup, |a, b| pairs.push((a, b)));
        pairs
    }
}
