//! Pairwise elastic collision resolution
//!
//! One pass over every unordered pair `(i, j)`, `i < j`, in index order:
//! 1. elastic impulse along the line of centres (momentum conserving)
//! 2. heuristic positional correction, split by post-impulse speed
//!
//! A body touching several others is corrected against each partner in turn,
//! so a single pass can leave residual overlap. Later steps clean it up.

use log::trace;

use super::states::{Body, NVec2};

/// Resolve every overlapping pair once. Returns the number of pairs resolved.
pub fn resolve_collisions(bodies: &mut [Body], min_separation: f64) -> usize {
    let n = bodies.len();
    let mut resolved = 0;

    for i in 0..n {
        // split so that bi and bj can be borrowed mutably together
        let (head, tail) = bodies.split_at_mut(i + 1);
        let bi = &mut head[i];
        for (k, bj) in tail.iter_mut().enumerate() {
            if bi.does_collide(bj) {
                resolve_pair(bi, bj, min_separation);
                trace!("collision resolved between {} and {}", i, i + 1 + k);
                resolved += 1;
            }
        }
    }

    resolved
}

/// Resolve one overlapping pair in place.
///
/// Coincident centres have no line of centres: the impulse is skipped and the
/// pair is pushed apart by the radius sum along the relative velocity, or
/// along +x when the bodies move together.
pub fn resolve_pair(a: &mut Body, b: &mut Body, min_separation: f64) {
    // d points from b toward a
    let d = a.position - b.position;
    let d2 = d.dot(&d);
    if d2 < min_separation * min_separation {
        separate_coincident(a, b);
        return;
    }

    let (ma, mb) = (a.mass(), b.mass());
    let factor = (a.velocity - b.velocity).dot(&d) / d2;

    if ma + mb == 0.0 {
        // Two inert bodies: exchange as if the masses were equal
        let exchange = d * factor;
        a.velocity -= exchange;
        b.velocity += exchange;
    } else {
        let impulse = d * (2.0 / (ma + mb) * factor);
        a.velocity -= impulse * mb;
        b.velocity += impulse * ma;
    }

    // Push apart by twice the overlap along d
    let reach = a.radius() as f64 + b.radius() as f64;
    let total_shift = d * (reach / d2.sqrt() * 2.0 - 2.0);
    let (a_share, b_share) = speed_split(a.speed(), b.speed());
    a.position += total_shift * a_share;
    b.position -= total_shift * b_share;
}

fn separate_coincident(a: &mut Body, b: &mut Body) {
    let axis = (a.velocity - b.velocity)
        .try_normalize(0.0)
        .unwrap_or_else(|| NVec2::new(1.0, 0.0));
    let half = axis * ((a.radius() as f64 + b.radius() as f64) * 0.5);
    a.position += half;
    b.position -= half;
}

/// Fractions of the correction taken by each body, faster body moves more.
/// Both at rest: equal halves.
fn speed_split(sa: f64, sb: f64) -> (f64, f64) {
    let total = sa + sb;
    if total == 0.0 || !total.is_finite() {
        return (0.5, 0.5);
    }
    let fa = sa / total;
    (fa, 1.0 - fa)
}

/// Momentum of a slice, for conservation checks
pub fn total_momentum(bodies: &[Body]) -> NVec2 {
    bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.momentum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-9;

    #[test]
    fn equal_masses_head_on_swap_velocities() {
        let mut a = Body::new(NVec2::new(-5.0, 0.0), 10, 500).with_velocity(NVec2::new(1.0, 0.0));
        let mut b = Body::new(NVec2::new(5.0, 0.0), 10, 500).with_velocity(NVec2::new(-1.0, 0.0));

        resolve_pair(&mut a, &mut b, EPS);

        assert_relative_eq!(a.velocity.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(a.velocity.y, 0.0);
        assert_relative_eq!(b.velocity.y, 0.0);
        // equal speeds: equal share of the 2 * overlap correction
        assert_relative_eq!(a.position.x, -15.0, epsilon = 1e-12);
        assert_relative_eq!(b.position.x, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn impulse_conserves_momentum() {
        let mut bodies = vec![
            Body::new(NVec2::new(0.0, 0.0), 12, 300).with_velocity(NVec2::new(2.0, 0.5)),
            Body::new(NVec2::new(15.0, 6.0), 7, 900).with_velocity(NVec2::new(-1.0, -0.25)),
        ];
        let before = total_momentum(&bodies);
        assert_eq!(resolve_collisions(&mut bodies, EPS), 1);
        let after = total_momentum(&bodies);

        assert_relative_eq!(before.x, after.x, max_relative = 1e-9);
        assert_relative_eq!(before.y, after.y, max_relative = 1e-9);
    }

    #[test]
    fn resting_pair_splits_correction_evenly() {
        // velocities stay zero after the impulse: no relative motion
        let mut a = Body::new(NVec2::new(0.0, 0.0), 10, 100);
        let mut b = Body::new(NVec2::new(10.0, 0.0), 10, 100);
        resolve_pair(&mut a, &mut b, EPS);

        assert!(a.position.x.is_finite() && b.position.x.is_finite());
        assert_relative_eq!(a.position.x, -10.0, epsilon = 1e-12);
        assert_relative_eq!(b.position.x, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn coincident_centres_separate_along_relative_velocity() {
        let mut a = Body::new(NVec2::new(3.0, 3.0), 10, 100).with_velocity(NVec2::new(0.0, 2.0));
        let mut b = Body::new(NVec2::new(3.0, 3.0), 6, 100);
        resolve_pair(&mut a, &mut b, EPS);

        // no impulse, 50/50 split of the radius sum
        assert_eq!(a.velocity, NVec2::new(0.0, 2.0));
        assert_eq!(b.velocity, NVec2::zeros());
        assert_relative_eq!(a.position.y, 11.0, epsilon = 1e-12);
        assert_relative_eq!(b.position.y, -5.0, epsilon = 1e-12);
        assert_relative_eq!(a.position.x, 3.0);
    }

    #[test]
    fn coincident_centres_at_rest_separate_along_x() {
        let mut a = Body::new(NVec2::new(0.0, 0.0), 10, 500);
        let mut b = Body::new(NVec2::new(0.0, 0.0), 10, 500);
        resolve_pair(&mut a, &mut b, EPS);

        assert_eq!(a.position, NVec2::new(10.0, 0.0));
        assert_eq!(b.position, NVec2::new(-10.0, 0.0));
    }

    #[test]
    fn inert_pair_stays_finite() {
        let mut a = Body::new(NVec2::new(-4.0, 0.0), 5, 0).with_velocity(NVec2::new(2.0, 0.0));
        let mut b = Body::new(NVec2::new(4.0, 0.0), 5, 0);
        resolve_pair(&mut a, &mut b, EPS);

        assert_relative_eq!(a.velocity.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.x, 2.0, epsilon = 1e-12);
        assert!(a.position.x.is_finite() && b.position.x.is_finite());
    }

    #[test]
    fn separated_bodies_are_untouched() {
        let mut bodies = vec![
            Body::new(NVec2::new(0.0, 0.0), 10, 100).with_velocity(NVec2::new(1.0, 0.0)),
            Body::new(NVec2::new(50.0, 0.0), 10, 100),
        ];
        let before = bodies.clone();
        assert_eq!(resolve_collisions(&mut bodies, EPS), 0);
        assert_eq!(bodies, before);
    }
}
