use proptest::prelude::*;
use signalmap::{compute_bounding_box, intersects, intersects_opt, BoundingBox, Coordinate, Ring};

fn bbox() -> impl Strategy<Value = BoundingBox> {
    (-90.0..90.0f64, -90.0..90.0f64, -180.0..180.0f64, -180.0..180.0f64)
        .prop_map(|(a, b, c, d)| BoundingBox::new(a.max(b), a.min(b), c.max(d), c.min(d)))
}

proptest! {
    #[test]
    fn intersects_is_symmetric(a in bbox(), b in bbox()) {
        prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
    }

    #[test]
    fn box_intersects_itself(a in bbox()) {
        prop_assert!(intersects(&a, &a));
    }

    #[test]
    fn ring_bbox_contains_its_vertices(points in prop::collection::vec((-90.0..90.0f64, -180.0..180.0f64), 1..20)) {
        let ring = Ring::new(points.iter().map(|&(lat, lng)| Coordinate::new(lat, lng)).collect());
        let bbox = compute_bounding_box(&ring).unwrap();
        for c in ring.iter() {
            prop_assert!(bbox.contains(c));
        }
    }
}

#[test]
fn touching_edges_intersect() {
    let a = BoundingBox::new(1.0, 0.0, 1.0, 0.0);
    let b = BoundingBox::new(2.0, 1.0, 2.0, 1.0);
    assert!(intersects(&a, &b));
    let c = BoundingBox::new(2.0, 1.0 + 1e-9, 2.0, 1.0 + 1e-9);
    assert!(!intersects(&a, &c));
}

#[test]
fn missing_box_never_intersects() {
    let a = BoundingBox::new(1.0, 0.0, 1.0, 0.0);
    assert!(!intersects_opt(Some(&a), None));
    assert!(!intersects_opt(None, Some(&a)));
    assert!(!intersects_opt(None, None));
    assert!(intersects_opt(Some(&a), Some(&a)));
}
