use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::body::{Body, Shape, ShapeKind};
use crate::types::Manifold;

/// Pairwise narrowphase tests (plane equations and SAT).
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    /// Dispatch over the ordered pair of shape tags. Mirrored orderings are
    /// handled by swapping arguments and flipping the manifold, so every
    /// routine exists exactly once. Returns `None` for disjoint or exactly
    /// touching shapes; identity pairs are the caller's job to skip.
    fn contact(a: &mut Body, b: &mut Body) -> Option<Manifold> {
        match (a.shape.kind(), b.shape.kind()) {
            (ShapeKind::HalfSpace, ShapeKind::HalfSpace) => None,
            (ShapeKind::Circle, ShapeKind::HalfSpace)
            | (ShapeKind::Polygon, ShapeKind::HalfSpace)
            | (ShapeKind::Polygon, ShapeKind::Circle) => {
                Self::contact(b, a).map(Manifold::flip)
            }
            (ShapeKind::HalfSpace, ShapeKind::Circle) => {
                let &Shape::HalfSpace { normal, intercept } = &a.shape else {
                    return None;
                };
                let &Shape::Circle { radius } = &b.shape else {
                    return None;
                };
                Self::halfspace_circle(normal, intercept, b.position, radius)
            }
            (ShapeKind::HalfSpace, ShapeKind::Polygon) => {
                let &Shape::HalfSpace { normal, intercept } = &a.shape else {
                    return None;
                };
                let (vb, _) = b.polygon_world();
                Self::halfspace_polygon(normal, intercept, vb)
            }
            (ShapeKind::Circle, ShapeKind::Circle) => {
                let &Shape::Circle { radius: r0 } = &a.shape else {
                    return None;
                };
                let &Shape::Circle { radius: r1 } = &b.shape else {
                    return None;
                };
                Self::circle_circle(a.position, r0, b.position, r1)
            }
            (ShapeKind::Circle, ShapeKind::Polygon) => {
                let &Shape::Circle { radius } = &a.shape else {
                    return None;
                };
                let center = a.position;
                let (vb, nb) = b.polygon_world();
                Self::circle_polygon(center, radius, vb, nb)
            }
            (ShapeKind::Polygon, ShapeKind::Polygon) => {
                let (va, na) = a.polygon_world();
                let (vb, nb) = b.polygon_world();
                Self::polygon_polygon(va, na, vb, nb)
            }
        }
    }

    fn halfspace_circle(
        normal: Vec2,
        intercept: f32,
        center: Vec2,
        radius: f32,
    ) -> Option<Manifold> {
        let distance = normal.dot(center) - intercept - radius;
        if distance >= 0.0 {
            return None;
        }
        let depth = -distance;
        // Point on the circle surface nearest the plane, pulled back by the
        // overlap.
        let position = center - normal * (radius - depth);
        Some(Manifold {
            position,
            normal,
            depth,
        })
    }

    fn halfspace_polygon(normal: Vec2, intercept: f32, verts: &[Vec2]) -> Option<Manifold> {
        let mut min_distance = f32::INFINITY;
        let mut deepest = 0;
        for (i, &v) in verts.iter().enumerate() {
            let d = normal.dot(v) - intercept;
            if d < min_distance {
                min_distance = d;
                deepest = i;
            }
        }
        if min_distance >= 0.0 {
            return None;
        }
        let depth = -min_distance;
        // Deepest vertex projected back onto the plane.
        let position = verts[deepest] + normal * depth;
        Some(Manifold {
            position,
            normal,
            depth,
        })
    }

    fn circle_circle(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> Option<Manifold> {
        let delta = c1 - c0;
        let dist = delta.length();
        let separation = dist - r0 - r1;
        if separation >= 0.0 {
            return None;
        }
        // Coincident centers have no separating direction; pick a fixed axis
        // so the positional correction still moves the pair apart.
        let normal = if dist > 0.0 { delta / dist } else { Vec2::X };
        let depth = -separation;
        let position = c0 + normal * (r0 - depth / 2.0);
        Some(Manifold {
            position,
            normal,
            depth,
        })
    }

    fn circle_polygon(
        center: Vec2,
        radius: f32,
        verts: &[Vec2],
        normals: &[Vec2],
    ) -> Option<Manifold> {
        // Vertex candidate: deepest polygon vertex measured toward the circle
        // along the reversed edge normal at that vertex.
        let mut min_vertex = f32::INFINITY;
        let mut vertex_idx = 0;
        for (j, (&v, &n)) in verts.iter().zip(normals).enumerate() {
            let d = (v - center).dot(-n) - radius;
            if d < min_vertex {
                min_vertex = d;
                vertex_idx = j;
            }
        }
        if min_vertex >= 0.0 {
            return None;
        }
        // Edge candidates: circle center against each polygon face, with the
        // standard SAT early-out on any separating face.
        let mut max_edge = f32::NEG_INFINITY;
        let mut edge_idx = 0;
        for (i, (&v, &n)) in verts.iter().zip(normals).enumerate() {
            let d = (center - v).dot(n) - radius;
            if d >= 0.0 {
                return None;
            }
            if d > max_edge {
                max_edge = d;
                edge_idx = i;
            }
        }
        // Least penetration across both candidate sets wins.
        if min_vertex > max_edge {
            let depth = -min_vertex;
            let normal = -normals[vertex_idx];
            let position = verts[vertex_idx] - normal * depth;
            Some(Manifold {
                position,
                normal,
                depth,
            })
        } else {
            let depth = -max_edge;
            let normal = -normals[edge_idx];
            let position = center + normal * (radius - depth);
            Some(Manifold {
                position,
                normal,
                depth,
            })
        }
    }

    fn polygon_polygon(
        va: &[Vec2],
        na: &[Vec2],
        vb: &[Vec2],
        nb: &[Vec2],
    ) -> Option<Manifold> {
        let (best_a, face_a, witness_a) = least_separation(va, na, vb)?;
        let (best_b, face_b, witness_b) = least_separation(vb, nb, va)?;
        if best_a > best_b {
            let depth = -best_a;
            let normal = na[face_a];
            // Offending vertex of B projected back onto A's face.
            let position = vb[witness_a] - normal * depth;
            Some(Manifold {
                position,
                normal,
                depth,
            })
        } else {
            let depth = -best_b;
            let normal = -nb[face_b];
            let position = va[witness_b] - normal * depth;
            Some(Manifold {
                position,
                normal,
                depth,
            })
        }
    }
}

/// Per-face minimum separation of `other`'s vertices against each face of
/// (`verts`, `normals`), then the maximum (least negative) across faces.
/// `None` means some face separates the shapes (SAT early-out). Otherwise
/// returns `(separation, face index, witness vertex index in other)`.
fn least_separation(
    verts: &[Vec2],
    normals: &[Vec2],
    other: &[Vec2],
) -> Option<(f32, usize, usize)> {
    let mut best = f32::NEG_INFINITY;
    let mut best_face = 0;
    let mut best_witness = 0;
    for (i, (&v, &n)) in verts.iter().zip(normals).enumerate() {
        let mut min_d = f32::INFINITY;
        let mut min_j = 0;
        for (j, &w) in other.iter().enumerate() {
            let d = (w - v).dot(n);
            if d < min_d {
                min_d = d;
                min_j = j;
            }
        }
        if min_d >= 0.0 {
            return None;
        }
        if min_d > best {
            best = min_d;
            best_face = i;
            best_witness = min_j;
        }
    }
    Some((best, best_face, best_witness))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_body(x: f32, y: f32, r: f32) -> Body {
        Body::circle(1.0, r, Vec2::new(x, y), Vec2::ZERO, 0.0, 0.0).unwrap()
    }

    fn square_body(x: f32, y: f32, w: f32) -> Body {
        Body::square(1.0, w, Vec2::new(x, y), Vec2::ZERO, 0.0, 0.0).unwrap()
    }

    #[test]
    fn test_circle_circle_normal_convention() {
        // A at origin, B at (3,0), radii 2: overlap depth 1, normal from A to B.
        let m = Narrowphase::circle_circle(Vec2::ZERO, 2.0, Vec2::new(3.0, 0.0), 2.0).unwrap();
        assert!((m.normal - Vec2::X).length() < 1e-6);
        assert!((m.depth - 1.0).abs() < 1e-6);
        // Midpoint-biased contact: A.position + normal * (rA - depth/2).
        assert!((m.position - Vec2::new(1.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_circle_circle_touching_is_no_collision() {
        assert!(Narrowphase::circle_circle(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0).is_none());
        assert!(Narrowphase::circle_circle(Vec2::ZERO, 1.0, Vec2::new(2.5, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_halfspace_circle_depth_and_position() {
        // Floor through the origin, circle dipping 0.25 below.
        let m = Narrowphase::halfspace_circle(Vec2::Y, 0.0, Vec2::new(0.0, 0.75), 1.0).unwrap();
        assert!((m.depth - 0.25).abs() < 1e-6);
        assert!((m.normal - Vec2::Y).length() < 1e-6);
        assert!((m.position - Vec2::ZERO).length() < 1e-6);
    }

    #[test]
    fn test_halfspace_circle_rejects_on_or_above_plane() {
        assert!(Narrowphase::halfspace_circle(Vec2::Y, 0.0, Vec2::new(0.0, 1.0), 1.0).is_none());
        assert!(Narrowphase::halfspace_circle(Vec2::Y, 0.0, Vec2::new(0.0, 5.0), 1.0).is_none());
    }

    #[test]
    fn test_halfspace_polygon_deepest_vertex() {
        // Unit square straddling the floor: deepest vertices at y = -0.25.
        let verts = [
            Vec2::new(0.0, -0.25),
            Vec2::new(1.0, -0.25),
            Vec2::new(1.0, 0.75),
            Vec2::new(0.0, 0.75),
        ];
        let m = Narrowphase::halfspace_polygon(Vec2::Y, 0.0, &verts).unwrap();
        assert!((m.depth - 0.25).abs() < 1e-6);
        // Deepest vertex projected back onto the plane.
        assert!(m.position.y.abs() < 1e-6);

        let above = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)];
        assert!(Narrowphase::halfspace_polygon(Vec2::Y, 0.0, &above).is_none());
    }

    #[test]
    fn test_circle_polygon_face_contact() {
        // Circle pressed into the left face of a unit square at the origin.
        let mut poly = square_body(0.0, 0.0, 1.0);
        let (vb, nb) = poly.polygon_world();
        let m = Narrowphase::circle_polygon(Vec2::new(-0.2, 0.5), 0.5, vb, nb).unwrap();
        assert!((m.depth - 0.3).abs() < 1e-5);
        // From the circle toward the polygon.
        assert!((m.normal - Vec2::X).length() < 1e-5);
        assert!((m.position - Vec2::new(0.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_circle_polygon_separated() {
        let mut poly = square_body(0.0, 0.0, 1.0);
        let (vb, nb) = poly.polygon_world();
        assert!(Narrowphase::circle_polygon(Vec2::new(-0.6, 0.5), 0.5, vb, nb).is_none());
    }

    #[test]
    fn test_polygon_polygon_overlap_and_separation() {
        let mut a = square_body(0.0, 0.0, 1.0);
        let mut b = square_body(0.8, 0.0, 1.0);
        let m = Narrowphase::contact(&mut a, &mut b).unwrap();
        assert!((m.depth - 0.2).abs() < 1e-5);
        // Axis of least penetration is horizontal, pointing from A to B.
        assert!((m.normal - Vec2::X).length() < 1e-5);

        let mut far = square_body(3.0, 0.0, 1.0);
        assert!(Narrowphase::contact(&mut a, &mut far).is_none());
    }

    #[test]
    fn test_contact_symmetry_under_swap() {
        let cases: Vec<(Body, Body)> = vec![
            (circle_body(0.0, 0.0, 2.0), circle_body(3.0, 0.0, 2.0)),
            (circle_body(-0.2, 0.5, 1.0), square_body(0.0, 0.0, 1.0)),
            (square_body(0.0, 0.0, 1.0), square_body(0.8, 0.3, 1.0)),
            (
                Body::half_space(Vec2::ZERO, Vec2::Y).unwrap(),
                circle_body(0.0, 0.75, 1.0),
            ),
            (
                Body::half_space(Vec2::ZERO, Vec2::Y).unwrap(),
                square_body(0.0, -0.25, 1.0),
            ),
        ];
        for (mut a, mut b) in cases {
            let ab = Narrowphase::contact(&mut a, &mut b).expect("pair should overlap");
            let ba = Narrowphase::contact(&mut b, &mut a).expect("pair should overlap");
            assert!((ab.normal + ba.normal).length() < 1e-6);
            assert!((ab.depth - ba.depth).abs() < 1e-6);
            // Both contact points lie on the shared penetration axis; they
            // need not be identical for same-tag pairs, but must agree along
            // the normal.
            let along = (ab.position - ba.position).dot(ab.normal).abs();
            assert!(along < ab.depth + 1e-5);
        }
    }

    #[test]
    fn test_halfspace_pair_never_collides() {
        let mut a = Body::half_space(Vec2::ZERO, Vec2::Y).unwrap();
        let mut b = Body::half_space(Vec2::ZERO, -Vec2::Y).unwrap();
        assert!(Narrowphase::contact(&mut a, &mut b).is_none());
    }
}
