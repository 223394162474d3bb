use crate::api::NarrowphaseApi;
use crate::types::*;

/// Narrowphase primitive tests for circles and axis-aligned boxes.
pub struct Narrowphase;

#[inline]
fn axis_sign(v: f64) -> f64 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}

impl NarrowphaseApi for Narrowphase {
    fn overlap_circle_circle(c0: Vector2, r0: f64, c1: Vector2, r1: f64) -> Option<Contact> {
        let delta = c1 - c0;
        let dist2 = delta.length_squared();
        let rsum = r0 + r1;
        if dist2 >= rsum * rsum {
            return None;
        }
        if dist2 == 0.0 {
            // Coincident centers; any axis separates them.
            return Some(Contact {
                normal: Vector2::X,
                penetration: rsum,
            });
        }
        let dist = dist2.sqrt();
        Some(Contact {
            normal: delta / dist,
            penetration: rsum - dist,
        })
    }

    fn overlap_box_box(c0: Vector2, h0: Vector2, c1: Vector2, h1: Vector2) -> Option<Contact> {
        // Overlap extents along each axis
        let d = c1 - c0;
        let ox = (h0.x + h1.x) - d.x.abs();
        let oy = (h0.y + h1.y) - d.y.abs();
        if ox <= 0.0 || oy <= 0.0 {
            return None;
        }

        // Resolve along the axis of minimum penetration
        let (normal, penetration) = if ox <= oy {
            (Vector2::new(axis_sign(d.x), 0.0), ox)
        } else {
            (Vector2::new(0.0, axis_sign(d.y)), oy)
        };
        Some(Contact { normal, penetration })
    }

    fn overlap_circle_box(c: Vector2, r: f64, box_c: Vector2, box_h: Vector2) -> Option<Contact> {
        let closest = c.clamp(box_c - box_h, box_c + box_h);
        let delta = c - closest;
        let dist2 = delta.length_squared();

        if dist2 > 0.0 {
            if dist2 >= r * r {
                return None;
            }
            let dist = dist2.sqrt();
            // `delta` points from the box surface out to the circle; flip it.
            return Some(Contact {
                normal: -(delta / dist),
                penetration: r - dist,
            });
        }

        // Center inside (or on) the box: push out through the nearest face.
        let local = c - box_c;
        let dx = box_h.x - local.x.abs();
        let dy = box_h.y - local.y.abs();
        let (out, face) = if dx <= dy {
            (Vector2::new(axis_sign(local.x), 0.0), dx)
        } else {
            (Vector2::new(0.0, axis_sign(local.y)), dy)
        };
        Some(Contact {
            normal: -out,
            penetration: r + face,
        })
    }

    fn point_in_box(p: Vector2, c: Vector2, h: Vector2) -> bool {
        Aabb::from_center(c, h).contains(p)
    }

    fn point_in_circle(p: Vector2, c: Vector2, r: f64) -> bool {
        (p - c).length_squared() <= r * r
    }
}
