use common::shapes::{Boundable, Rectangle};

// Strict on every edge: rectangles that only touch do not overlap.
pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    a.right() > b.left() && a.left() < b.right() && a.bottom() > b.top() && a.top() < b.bottom()
}

pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Boundable + ?Sized,
    B: Boundable + ?Sized,
{
    rectangle_rectangle(&a.bounding_box(), &b.bounding_box())
}
