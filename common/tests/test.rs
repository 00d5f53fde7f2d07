use common::shapes::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Sprite {
    id: u32,
    rect: Rectangle,
}

impl Boundable for Sprite {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn x(&self) -> f32 {
        self.rect.x
    }

    fn y(&self) -> f32 {
        self.rect.y
    }

    fn width(&self) -> f32 {
        self.rect.width
    }

    fn height(&self) -> f32 {
        self.rect.height
    }
}

#[test]
fn test_new_and_getters() {
    let rect = Rectangle::new(2.0, 3.0, 4.0, 6.0);
    assert_eq!(rect.width(), 4.0);
    assert_eq!(rect.height(), 6.0);
    assert_eq!(rect.left(), 0.0);
    assert_eq!(rect.right(), 4.0);
    assert_eq!(rect.top(), 0.0);
    assert_eq!(rect.bottom(), 6.0);
    assert_eq!(rect.top_left(), (0.0, 0.0));
    assert_eq!(rect.bottom_right(), (4.0, 6.0));
}

#[test]
fn test_from_origin() {
    let rect = Rectangle::from_origin(0.0, 0.0, 800.0, 600.0);
    assert_eq!(rect.x, 400.0);
    assert_eq!(rect.y, 300.0);
    assert_eq!(rect.top_left(), (0.0, 0.0));
    assert_eq!(rect.bottom_right(), (800.0, 600.0));
}

#[test]
fn test_contains_point() {
    let rect = Rectangle::new(2.0, 3.0, 4.0, 6.0);
    assert!(rect.contains_point(2.0, 3.0));
    // Edges are inside.
    assert!(rect.contains_point(4.0, 6.0));
    assert!(!rect.contains_point(6.0, 3.0));
    assert!(!rect.contains_point(2.0, 8.0));
}

#[test]
fn test_inflate() {
    let rect = Rectangle::new(10.0, 10.0, 4.0, 2.0).inflate(3.0);
    assert_eq!(rect.width(), 10.0);
    assert_eq!(rect.height(), 8.0);
    assert_eq!(rect.left(), 5.0);
    assert_eq!(rect.top(), 6.0);
}

#[test]
fn test_boundable_bounding_box() {
    let sprite = Sprite {
        id: 7,
        rect: Rectangle::new(5.0, 5.0, 2.0, 4.0),
    };
    assert_eq!(sprite.id(), 7);
    assert_eq!(sprite.bounding_box(), Rectangle::new(5.0, 5.0, 2.0, 4.0));
    assert_eq!(sprite.bounding_box().top(), 3.0);
}

#[test]
fn test_random_point_inside() {
    let rect = Rectangle::new(2.0, 3.0, 6.0, 8.0);

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    for _ in 0..100 {
        let (x, y) = rect.random_point_inside(&mut rng);
        assert!(rect.contains_point(x, y));
    }
}

#[test]
fn test_random_point_inside_degenerate_rectangle() {
    let rect = Rectangle::new(2.0, 3.0, 0.0, 0.0);
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);
    assert_eq!(rect.random_point_inside(&mut rng), (2.0, 3.0));
}
