use common::shapes::Rectangle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeIndex(pub(crate) usize);

pub(crate) const ROOT: NodeIndex = NodeIndex(0);

// y grows downward, so "north" is the top half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }
}

pub(crate) enum NodeKind<I> {
    Leaf { bucket: Vec<I> },
    Internal { children: [NodeIndex; 4] },
}

pub(crate) struct QuadNode<I> {
    pub(crate) left: f32,
    pub(crate) top: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeIndex>,
    // Which quadrant of `parent` this node covers. `None` only for the root.
    pub(crate) quadrant: Option<Quadrant>,
    pub(crate) kind: NodeKind<I>,
}

impl<I> QuadNode<I> {
    pub(crate) fn new_leaf(
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        depth: usize,
        parent: Option<(NodeIndex, Quadrant)>,
    ) -> Self {
        Self {
            left,
            top,
            width,
            height,
            depth,
            parent: parent.map(|(index, _)| index),
            quadrant: parent.map(|(_, quadrant)| quadrant),
            kind: NodeKind::Leaf { bucket: Vec::new() },
        }
    }

    #[inline(always)]
    pub(crate) fn mid_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[inline(always)]
    pub(crate) fn mid_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    #[inline(always)]
    pub(crate) fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline(always)]
    pub(crate) fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub(crate) fn bucket(&self) -> Option<&[I]> {
        match &self.kind {
            NodeKind::Leaf { bucket } => Some(bucket),
            NodeKind::Internal { .. } => None,
        }
    }

    pub(crate) fn children(&self) -> Option<&[NodeIndex; 4]> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { children } => Some(children),
        }
    }

    // Points on a midpoint belong to the right / bottom half.
    #[inline(always)]
    pub(crate) fn quadrant_of(&self, x: f32, y: f32) -> Quadrant {
        let left = x < self.mid_x();
        let top = y < self.mid_y();
        match (left, top) {
            (true, true) => Quadrant::NorthWest,
            (true, false) => Quadrant::SouthWest,
            (false, true) => Quadrant::NorthEast,
            (false, false) => Quadrant::SouthEast,
        }
    }

    // Closed-interval test, so a region touching the box edge counts.
    pub(crate) fn touches(&self, left: f32, top: f32, right: f32, bottom: f32) -> bool {
        self.left <= right && self.right() >= left && self.top <= bottom && self.bottom() >= top
    }

    pub(crate) fn bounding_box(&self) -> Rectangle {
        Rectangle::from_origin(self.left, self.top, self.width, self.height)
    }

    // Top-left corner of the given child quadrant.
    pub(crate) fn child_origin(&self, quadrant: Quadrant) -> (f32, f32) {
        match quadrant {
            Quadrant::NorthWest => (self.left, self.top),
            Quadrant::NorthEast => (self.mid_x(), self.top),
            Quadrant::SouthWest => (self.left, self.mid_y()),
            Quadrant::SouthEast => (self.mid_x(), self.mid_y()),
        }
    }
}
