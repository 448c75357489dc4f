use crate::geom::{Coordinate, Polygon, Ring};

/// Even-odd ray casting. Casts a ray towards increasing longitude and counts
/// edge crossings. Points exactly on an edge may land on either side.
pub fn point_in_ring(point: &Coordinate, ring: &Ring) -> bool {
    let coords = ring.coords();
    let n = coords.len();
    if n < 3 { return false }

    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (coords[i].lng, coords[i].lat);
        let (xj, yj) = (coords[j].lng, coords[j].lat);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True iff `point` is inside the outer ring and outside every hole.
pub fn point_in_polygon_with_holes(point: &Coordinate, polygon: &Polygon) -> bool {
    point_in_ring(point, polygon.outer())
        && !polygon.holes().iter().any(|hole| point_in_ring(point, hole))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Point};

    fn ring(coords: &[(f64, f64)]) -> Ring {
        Ring::new(coords.iter().map(|&(lat, lng)| Coordinate::new(lat, lng)).collect())
    }

    fn donut() -> Polygon {
        Polygon::new(
            "donut",
            ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            vec![ring(&[(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)])],
        )
    }

    #[test]
    fn hole_excludes_point() {
        let polygon = donut();
        assert!(!point_in_polygon_with_holes(&Coordinate::new(5.0, 5.0), &polygon));
        assert!(point_in_polygon_with_holes(&Coordinate::new(1.0, 1.0), &polygon));
    }

    #[test]
    fn outside_outer_ring() {
        let polygon = donut();
        assert!(!point_in_polygon_with_holes(&Coordinate::new(11.0, 5.0), &polygon));
        assert!(!point_in_polygon_with_holes(&Coordinate::new(-1.0, -1.0), &polygon));
    }

    #[test]
    fn degenerate_ring_contains_nothing() {
        let line = ring(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(!point_in_ring(&Coordinate::new(0.5, 0.5), &line));
    }

    #[test]
    fn concave_ring() {
        // A "U" shape opening to the north.
        let u = ring(&[
            (0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 2.0),
            (1.0, 2.0), (1.0, 1.0), (3.0, 1.0), (3.0, 0.0),
        ]);
        assert!(point_in_ring(&Coordinate::new(0.5, 1.5), &u));
        assert!(!point_in_ring(&Coordinate::new(2.0, 1.5), &u));
        assert!(point_in_ring(&Coordinate::new(2.0, 0.5), &u));
    }

    #[test]
    fn agrees_with_geo_contains_on_interior_points() {
        let polygon = donut();
        let geo_polygon = polygon.to_geo();
        for lat in (0..20).map(|i| i as f64 * 0.5 + 0.25) {
            for lng in (0..20).map(|i| i as f64 * 0.5 + 0.25) {
                let expected = geo_polygon.contains(&Point::new(lng, lat));
                let actual = point_in_polygon_with_holes(&Coordinate::new(lat, lng), &polygon);
                assert_eq!(actual, expected, "mismatch at ({lat}, {lng})");
            }
        }
    }
}
