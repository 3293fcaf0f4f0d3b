//! Included angle between two captured flank lines.
//!
//! Points are captured in physical millimetres. Line 1 runs from point 1 to
//! point 2, line 2 from point 3 to point 4. The angle reported is always the
//! acute one, whichever direction each line was captured in.

use serde::{Deserialize, Serialize};

use crate::geometry::MmPoint;
use crate::{Fault, MAX_ANGLE_POINTS};

/// Ordered, capped list of captured angle points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnglePoints {
    points: Vec<MmPoint>,
}

impl AnglePoints {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a point.
    ///
    /// Returns error (and leaves the list untouched) once four points exist.
    pub fn push(&mut self, point: MmPoint) -> Result<usize, Fault> {
        if self.is_full() {
            return Err(Fault::capacity());
        }
        self.points.push(point);
        Ok(self.points.len())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= MAX_ANGLE_POINTS
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn as_slice(&self) -> &[MmPoint] {
        &self.points
    }

    /// The four points, once all have been captured.
    pub fn quad(&self) -> Option<[MmPoint; 4]> {
        match self.points.as_slice() {
            [p1, p2, p3, p4] => Some([*p1, *p2, *p3, *p4]),
            _ => None,
        }
    }
}

/// Acute included angle in degrees between line p1→p2 and line p3→p4.
///
/// Returns `DegenerateVector` when either line has zero length.
pub fn included_angle(points: [MmPoint; 4]) -> Result<f64, Fault> {
    let [p1, p2, p3, p4] = points;
    let v1 = p1.to(p2);
    let v2 = p3.to(p4);

    let mag1 = v1.length();
    let mag2 = v2.length();
    if mag1 <= 0.0 {
        return Err(Fault::DegenerateVector { line: 1 });
    }
    if mag2 <= 0.0 {
        return Err(Fault::DegenerateVector { line: 2 });
    }

    // |dot| folds obtuse readings onto the acute angle; clamp guards acos.
    let cos_theta = (v1.dot(v2).abs() / (mag1 * mag2)).clamp(-1.0, 1.0);
    Ok(cos_theta.acos().to_degrees())
}

/// As [`included_angle`], reporting 0° for degenerate lines.
pub fn included_angle_or_zero(points: [MmPoint; 4]) -> f64 {
    match included_angle(points) {
        Ok(angle) => angle,
        Err(fault) => {
            tracing::debug!(%fault, "angle falls back to 0°");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn thread_flanks() -> [MmPoint; 4] {
        [
            MmPoint::new(13.0, -5.5),
            MmPoint::new(7.0, 5.5),
            MmPoint::new(-7.0, 5.5),
            MmPoint::new(-13.0, -5.5),
        ]
    }

    #[test]
    fn thread_flank_angle() {
        let angle = included_angle(thread_flanks()).unwrap();
        // cos θ = 85 / 157
        assert!((angle - 57.2209).abs() < 1e-3, "got {angle}");
    }

    #[test]
    fn perpendicular_and_parallel_lines() {
        let square = [
            MmPoint::new(0.0, 0.0),
            MmPoint::new(1.0, 0.0),
            MmPoint::new(0.0, 0.0),
            MmPoint::new(0.0, 1.0),
        ];
        assert!((included_angle(square).unwrap() - 90.0).abs() < 1e-9);

        let parallel = [
            MmPoint::new(0.0, 0.0),
            MmPoint::new(2.0, 0.0),
            MmPoint::new(5.0, 0.0),
            MmPoint::new(1.0, 0.0),
        ];
        assert_eq!(included_angle(parallel).unwrap(), 0.0);
    }

    #[test]
    fn diagonal_parallel_lines_read_zero() {
        // sqrt(8) * sqrt(32) is not exactly 16, so acos sees slightly under 1.
        let parallel = [
            MmPoint::new(0.0, 0.0),
            MmPoint::new(2.0, 2.0),
            MmPoint::new(5.0, 5.0),
            MmPoint::new(1.0, 1.0),
        ];
        let angle = included_angle(parallel).unwrap();
        assert!(angle.abs() < 1e-5);
        assert_eq!(crate::MeasuredResult::angle(angle, None).measured(), "0.00°");
    }

    #[test]
    fn degenerate_lines_report_zero() {
        let p = MmPoint::new(1.0, 1.0);
        let points = [p, p, MmPoint::ZERO, MmPoint::new(1.0, 0.0)];
        assert_eq!(
            included_angle(points),
            Err(Fault::DegenerateVector { line: 1 })
        );
        assert_eq!(included_angle_or_zero(points), 0.0);

        let points = [MmPoint::ZERO, MmPoint::new(1.0, 0.0), p, p];
        assert_eq!(
            included_angle(points),
            Err(Fault::DegenerateVector { line: 2 })
        );
    }

    #[test]
    fn points_are_capped() {
        let mut points = AnglePoints::new();
        for i in 0..4 {
            assert_eq!(points.push(MmPoint::new(i as f64, 0.0)).unwrap(), i + 1);
        }
        assert!(points.is_full());
        assert_eq!(points.push(MmPoint::ZERO), Err(Fault::capacity()));
        assert_eq!(points.len(), 4);
        assert!(points.quad().is_some());

        points.clear();
        assert!(points.is_empty());
        assert!(points.quad().is_none());
    }

    fn coord() -> impl Strategy<Value = f64> {
        -200.0..200.0f64
    }

    fn point() -> impl Strategy<Value = MmPoint> {
        (coord(), coord()).prop_map(|(x, y)| MmPoint::new(x, y))
    }

    proptest! {
        #[test]
        fn angle_is_acute(p1 in point(), p2 in point(), p3 in point(), p4 in point()) {
            let angle = included_angle_or_zero([p1, p2, p3, p4]);
            prop_assert!((0.0..=90.0).contains(&angle), "angle {} out of range", angle);
        }

        #[test]
        fn angle_ignores_capture_direction(p1 in point(), p2 in point(), p3 in point(), p4 in point()) {
            let base = included_angle_or_zero([p1, p2, p3, p4]);
            let first_swapped = included_angle_or_zero([p2, p1, p3, p4]);
            let second_swapped = included_angle_or_zero([p1, p2, p4, p3]);
            prop_assert!((base - first_swapped).abs() < 1e-9);
            prop_assert!((base - second_swapped).abs() < 1e-9);
        }
    }
}
