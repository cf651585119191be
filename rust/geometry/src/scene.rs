// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory barrier scene
//!
//! A flat list of triangulated faces tagged with the barrier they belong to
//! and its category. Casting a ray tests every face admitted by the filter
//! and yields one hit per crossed face, so a solid wall crossed by a ray
//! reports both its entry and exit faces, and a wall modelled as several
//! solids reports every sub-surface it has.

use mep_openings_core::{BarrierRef, ElementCategory};
use nalgebra::{Point3, Vector3};

use crate::caster::{ElementClassFilter, Hits, RayCaster};
use crate::ray::{Ray, RayHit};

/// Determinant threshold below which a ray is treated as parallel to a face.
const PARALLEL_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
struct SceneFace {
    barrier: BarrierRef,
    category: ElementCategory,
    vertices: [Point3<f64>; 3],
}

/// Triangulated barrier geometry that answers ray queries.
#[derive(Debug, Clone, Default)]
pub struct BarrierScene {
    faces: Vec<SceneFace>,
}

impl BarrierScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn add_triangle(
        &mut self,
        barrier: BarrierRef,
        category: ElementCategory,
        vertices: [Point3<f64>; 3],
    ) {
        self.faces.push(SceneFace {
            barrier,
            category,
            vertices,
        });
    }

    /// Adds a planar quad given in boundary order.
    pub fn add_quad(
        &mut self,
        barrier: BarrierRef,
        category: ElementCategory,
        [a, b, c, d]: [Point3<f64>; 4],
    ) {
        self.add_triangle(barrier, category, [a, b, c]);
        self.add_triangle(barrier, category, [a, c, d]);
    }

    /// Adds a box spanned by eight corners: four bottom corners in boundary
    /// order followed by the matching four top corners.
    pub fn add_hexahedron(
        &mut self,
        barrier: BarrierRef,
        category: ElementCategory,
        corners: [Point3<f64>; 8],
    ) {
        let [b0, b1, b2, b3, t0, t1, t2, t3] = corners;
        self.add_quad(barrier, category, [b0, b1, b2, b3]);
        self.add_quad(barrier, category, [t0, t1, t2, t3]);
        self.add_quad(barrier, category, [b0, b1, t1, t0]);
        self.add_quad(barrier, category, [b1, b2, t2, t1]);
        self.add_quad(barrier, category, [b2, b3, t3, t2]);
        self.add_quad(barrier, category, [b3, b0, t0, t3]);
    }

    /// Adds a straight wall as a solid box.
    ///
    /// `start` and `end` are the ends of the wall's location line at its
    /// base; the solid extends `thickness / 2` to both sides of that line
    /// and `height` upward. Returns `false` and adds nothing when the
    /// location line has no horizontal extent.
    pub fn add_wall(
        &mut self,
        barrier: BarrierRef,
        start: Point3<f64>,
        end: Point3<f64>,
        thickness: f64,
        height: f64,
    ) -> bool {
        let along = Vector3::new(end.x - start.x, end.y - start.y, 0.0);
        let Some(along) = along.try_normalize(PARALLEL_EPSILON) else {
            return false;
        };
        let half = Vector3::new(-along.y, along.x, 0.0) * (thickness / 2.0);
        let up = Vector3::new(0.0, 0.0, height);
        let end = Point3::new(end.x, end.y, start.z);

        let b0 = start - half;
        let b1 = end - half;
        let b2 = end + half;
        let b3 = start + half;
        self.add_hexahedron(
            barrier,
            ElementCategory::Walls,
            [b0, b1, b2, b3, b0 + up, b1 + up, b2 + up, b3 + up],
        );
        true
    }
}

impl RayCaster for BarrierScene {
    fn cast<'a>(&'a self, ray: &Ray, filter: &'a ElementClassFilter) -> Hits<'a> {
        let ray = *ray;
        Box::new(
            self.faces
                .iter()
                .filter(move |face| filter.accepts(face.category))
                .filter_map(move |face| {
                    let [v0, v1, v2] = &face.vertices;
                    ray_triangle_distance(&ray, v0, v1, v2)
                        .map(|t| RayHit::new(face.barrier, t))
                }),
        )
    }
}

/// Möller–Trumbore ray-triangle intersection.
///
/// Returns the distance along the ray to the crossing point, if the ray
/// hits the triangle (v0, v1, v2) at or in front of its origin.
fn ray_triangle_distance(
    ray: &Ray,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> Option<f64> {
    let dir = ray.direction.into_inner();
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = dir.cross(&edge2);
    let a = edge1.dot(&h);

    if a.abs() < PARALLEL_EPSILON {
        return None; // ray parallel to triangle
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(&h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * dir.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mep_openings_core::ElementId;
    use nalgebra::Unit;

    fn x_ray(origin: Point3<f64>) -> Ray {
        Ray::new(origin, Unit::new_normalize(Vector3::new(1.0, 0.0, 0.0)))
    }

    /// Wall across the X axis at `x`, 0.2 thick, 3 high, spanning y in [-5, 5].
    fn cross_wall(scene: &mut BarrierScene, id: i64, x: f64) {
        assert!(scene.add_wall(
            BarrierRef::local(ElementId(id)),
            Point3::new(x, -5.0, -1.0),
            Point3::new(x, 5.0, -1.0),
            0.2,
            3.0,
        ));
    }

    #[test]
    fn wall_box_has_twelve_triangles() {
        let mut scene = BarrierScene::new();
        cross_wall(&mut scene, 1, 4.0);
        assert_eq!(scene.face_count(), 12);
    }

    #[test]
    fn ray_through_wall_hits_both_faces() {
        let mut scene = BarrierScene::new();
        cross_wall(&mut scene, 1, 4.0);

        let filter = ElementClassFilter::walls();
        let mut distances: Vec<f64> = scene
            .cast(&x_ray(Point3::new(0.0, 0.3, 0.0)), &filter)
            .map(|hit| hit.proximity)
            .collect();
        distances.sort_by(f64::total_cmp);

        assert_eq!(distances.len(), 2);
        assert_relative_eq!(distances[0], 3.9, epsilon = 1e-9);
        assert_relative_eq!(distances[1], 4.1, epsilon = 1e-9);
    }

    #[test]
    fn geometry_behind_origin_is_ignored() {
        let mut scene = BarrierScene::new();
        cross_wall(&mut scene, 1, -4.0);

        let filter = ElementClassFilter::walls();
        let hits = scene.cast(&x_ray(Point3::new(0.0, 0.3, 0.0)), &filter).count();
        assert_eq!(hits, 0);
    }

    #[test]
    fn filter_excludes_non_wall_geometry() {
        let mut scene = BarrierScene::new();
        scene.add_quad(
            BarrierRef::local(ElementId(9)),
            ElementCategory::Floors,
            [
                Point3::new(2.0, -1.0, -1.0),
                Point3::new(2.0, 1.0, -1.0),
                Point3::new(2.0, 1.0, 1.0),
                Point3::new(2.0, -1.0, 1.0),
            ],
        );

        let ray = x_ray(Point3::new(0.0, 0.2, 0.1));
        assert_eq!(scene.cast(&ray, &ElementClassFilter::walls()).count(), 0);
        let floors = ElementClassFilter::new([ElementCategory::Floors]);
        assert_eq!(scene.cast(&ray, &floors).count(), 1);
    }

    #[test]
    fn ray_parallel_to_wall_misses() {
        let mut scene = BarrierScene::new();
        cross_wall(&mut scene, 1, 4.0);

        let ray = Ray::new(
            Point3::new(0.0, 0.0, 0.0),
            Unit::new_normalize(Vector3::new(0.0, 1.0, 0.0)),
        );
        assert_eq!(scene.cast(&ray, &ElementClassFilter::walls()).count(), 0);
    }

    #[test]
    fn wall_without_horizontal_extent_is_rejected() {
        let mut scene = BarrierScene::new();
        let p = Point3::new(1.0, 1.0, 0.0);
        assert!(!scene.add_wall(BarrierRef::local(ElementId(1)), p, p, 0.2, 3.0));
        assert!(scene.is_empty());
    }
}
