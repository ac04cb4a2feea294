/// A point in `D`-dimensional space.
pub type Point<const D: usize> = [f64; D];

/// Squared Euclidean distance between two points.
#[inline]
pub fn dist_sq<const D: usize>(a: &Point<D>, b: &Point<D>) -> f64 {
    let mut d2 = 0.0;
    for i in 0..D {
        let d = a[i] - b[i];
        d2 += d * d;
    }
    d2
}

/// A point returned by a nearest-neighbor query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor<const D: usize> {
    /// Coordinates of the neighbor.
    pub point: Point<D>,
    /// Position of the neighbor in the list the tree was built from.
    pub index: usize,
    /// Squared distance to the query.
    pub dist_sq: f64,
}

impl<const D: usize> Neighbor<D> {
    /// Euclidean distance to the query.
    pub fn distance(&self) -> f64 {
        self.dist_sq.sqrt()
    }
}

pub(crate) fn is_finite<const D: usize>(p: &Point<D>) -> bool {
    p.iter().all(|v| v.is_finite())
}

/// Converts an untyped coordinate slice into a fixed-size point.
pub(crate) fn to_point<const D: usize>(coords: &[f64], what: &str) -> Result<Point<D>, crate::Error> {
    let point: Point<D> = coords
        .try_into()
        .map_err(|_| crate::Error::dimension_mismatch(what, D, coords.len()))?;
    if !is_finite(&point) {
        return Err(crate::Error::non_finite(what));
    }
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_sq() {
        assert_eq!(dist_sq(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(dist_sq(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_neighbor_distance() {
        let n = Neighbor { point: [3.0, 4.0], index: 7, dist_sq: 25.0 };
        assert_eq!(n.distance(), 5.0);
    }

    #[test]
    fn test_to_point() {
        let p: Point<3> = to_point(&[1.0, 2.0, 3.0], "row 0").unwrap();
        assert_eq!(p, [1.0, 2.0, 3.0]);

        let err = to_point::<3>(&[1.0, 2.0], "row 4").unwrap_err();
        assert_eq!(err, crate::Error::InvalidInput("row 4 has 2 coordinates, expected 3".into()));

        assert!(to_point::<2>(&[f64::NAN, 0.0], "query").is_err());
        assert!(to_point::<2>(&[0.0, f64::INFINITY], "query").is_err());
    }
}
