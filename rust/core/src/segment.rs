// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routing segments (ducts and pipes) and their location curves.

use nalgebra::{Point3, Unit, Vector3};

use crate::ids::ElementId;

/// Lines shorter than this are treated as degenerate.
const MIN_LINE_LENGTH: f64 = 1e-9;

/// Which source collection a segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    Duct,
    Pipe,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Duct => "duct",
            SegmentKind::Pipe => "pipe",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Curve a routing element is drawn along.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationCurve {
    Line {
        start: Point3<f64>,
        end: Point3<f64>,
    },
    /// Circular arc through three points.
    Arc {
        start: Point3<f64>,
        mid: Point3<f64>,
        end: Point3<f64>,
    },
    /// Free-form curve given by its control points.
    Spline { control_points: Vec<Point3<f64>> },
}

impl LocationCurve {
    pub fn line(start: Point3<f64>, end: Point3<f64>) -> Self {
        LocationCurve::Line { start, end }
    }

    /// The straight centerline, if this curve is a usable line.
    ///
    /// Returns `None` for arcs, splines and for lines that are too short or
    /// carry non-finite coordinates.
    pub fn as_line(&self) -> Option<SegmentLine> {
        match self {
            LocationCurve::Line { start, end } => SegmentLine::from_endpoints(*start, *end),
            LocationCurve::Arc { .. } | LocationCurve::Spline { .. } => None,
        }
    }
}

/// A bounded straight centerline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLine {
    pub start: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
    pub length: f64,
}

impl SegmentLine {
    pub fn from_endpoints(start: Point3<f64>, end: Point3<f64>) -> Option<Self> {
        let delta = end - start;
        let length = delta.norm();
        if !length.is_finite() || length < MIN_LINE_LENGTH {
            return None;
        }
        Some(Self {
            start,
            direction: Unit::new_unchecked(delta / length),
            length,
        })
    }

    pub fn end(&self) -> Point3<f64> {
        self.point_at(self.length)
    }

    /// Point at distance `t` from the start along the direction.
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.start + self.direction.into_inner() * t
    }
}

/// A duct or pipe run read from a source document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingSegment {
    pub id: ElementId,
    pub kind: SegmentKind,
    pub curve: LocationCurve,
    /// Outer diameter; openings are sized to it in both directions.
    pub diameter: f64,
}

impl RoutingSegment {
    pub fn duct(id: ElementId, curve: LocationCurve, diameter: f64) -> Self {
        Self {
            id,
            kind: SegmentKind::Duct,
            curve,
            diameter,
        }
    }

    pub fn pipe(id: ElementId, curve: LocationCurve, diameter: f64) -> Self {
        Self {
            id,
            kind: SegmentKind::Pipe,
            curve,
            diameter,
        }
    }

    pub fn centerline(&self) -> Option<SegmentLine> {
        self.curve.as_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn line_direction_and_length() {
        let line = SegmentLine::from_endpoints(
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(4.0, 6.0, 3.0),
        )
        .unwrap();

        assert_relative_eq!(line.length, 5.0);
        assert_relative_eq!(line.direction.x, 0.6);
        assert_relative_eq!(line.direction.y, 0.8);
        assert_relative_eq!(line.end(), Point3::new(4.0, 6.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_length_line_is_rejected() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(SegmentLine::from_endpoints(p, p).is_none());
    }

    #[test]
    fn non_finite_line_is_rejected() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let end = Point3::new(f64::NAN, 0.0, 0.0);
        assert!(SegmentLine::from_endpoints(start, end).is_none());
    }

    #[test]
    fn curved_centerline_has_no_line() {
        let arc = LocationCurve::Arc {
            start: Point3::new(0.0, 0.0, 0.0),
            mid: Point3::new(1.0, 1.0, 0.0),
            end: Point3::new(2.0, 0.0, 0.0),
        };
        let seg = RoutingSegment::pipe(ElementId(1), arc, 0.1);
        assert!(seg.centerline().is_none());
    }

    #[test]
    fn segment_constructors_set_kind() {
        let curve = LocationCurve::line(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(RoutingSegment::duct(ElementId(1), curve.clone(), 0.3).kind, SegmentKind::Duct);
        assert_eq!(RoutingSegment::pipe(ElementId(2), curve, 0.1).kind, SegmentKind::Pipe);
    }
}
