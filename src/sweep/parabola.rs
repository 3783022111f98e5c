//! Parabola model for beachline arcs
//!
//! Each processed site owns one parabola: the locus of points equidistant from
//! the site (the focus) and the sweep directrix. The coefficients depend on the
//! directrix height and are recomputed every time the sweep advances.

use glam::DVec2;

/// Index into the sweep's parabola arena
pub type ParabolaIndex = usize;

/// A site's parabola for the current directrix height
///
/// Stored in standard form `y = a*(x - b)^2 + c` with
/// `a = 1 / (2 * (focus.y - directrix))`, `b = focus.x`,
/// `c = (focus.y + directrix) / 2`.
///
/// When the focus sits exactly on the directrix (only true at the instant of the
/// site's own event) `a` is undefined and the parabola degenerates to the
/// vertical line `x = focus.x`; callers must check `is_degenerate_line` before
/// using the coefficients.
#[derive(Debug, Clone)]
pub struct Parabola {
    /// Index of the site this parabola belongs to
    pub site: usize,
    /// The site position
    pub focus: DVec2,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// True when `focus.y == directrix` and the coefficients are meaningless
    pub is_degenerate_line: bool,
}

impl Parabola {
    /// Create a parabola for a site at the given directrix height
    pub fn new(site: usize, focus: DVec2, directrix_y: f64) -> Self {
        let mut parabola = Self {
            site,
            focus,
            a: 0.0,
            b: focus.x,
            c: 0.0,
            is_degenerate_line: true,
        };
        parabola.reset(directrix_y);
        parabola
    }

    /// Recompute the coefficients for a new directrix height
    ///
    /// Falls silently into degenerate-line mode when the focus lies exactly on
    /// the directrix.
    pub fn reset(&mut self, directrix_y: f64) {
        if self.focus.y == directrix_y {
            self.is_degenerate_line = true;
            self.a = 0.0;
            self.b = self.focus.x;
            self.c = self.focus.y;
        } else {
            self.is_degenerate_line = false;
            self.a = 1.0 / (2.0 * (self.focus.y - directrix_y));
            self.b = self.focus.x;
            self.c = (self.focus.y + directrix_y) / 2.0;
        }
    }

    /// Evaluate the parabola at `x`
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * (x - self.b) * (x - self.b) + self.c
    }

    /// Find the x positions where two parabolas meet
    ///
    /// Solves the difference quadratic with the quadratic formula and returns
    /// both roots ordered `(smaller, larger)`; the caller picks the root that
    /// matches the side of the breakpoint being asked for.
    ///
    /// Returns `None` when the parabolas have equal curvature (the quadratic
    /// degenerates to a line) or the discriminant is negative. A `None` here is
    /// a per-candidate skip for the caller, never an error, and in particular a
    /// NaN is never produced.
    pub fn intersect(p1: &Parabola, p2: &Parabola) -> Option<(f64, f64)> {
        let qa = p1.a - p2.a;
        if qa == 0.0 {
            return None;
        }
        let qb = -2.0 * (p1.a * p1.b - p2.a * p2.b);
        let qc = p1.a * p1.b * p1.b + p1.c - p2.a * p2.b * p2.b - p2.c;

        let discriminant = qb * qb - 4.0 * qa * qc;
        if discriminant < 0.0 {
            return None;
        }

        let sq = discriminant.sqrt();
        let r1 = (-qb - sq) / (2.0 * qa);
        let r2 = (-qb + sq) / (2.0 * qa);
        Some((r1.min(r2), r1.max(r2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        let p = Parabola::new(0, DVec2::new(3.0, 1.0), 5.0);
        assert!(!p.is_degenerate_line);
        assert_eq!(p.a, 1.0 / (2.0 * (1.0 - 5.0)));
        assert_eq!(p.b, 3.0);
        assert_eq!(p.c, 3.0);

        // The vertex sits halfway between focus and directrix, above the focus.
        assert_eq!(p.evaluate(3.0), 3.0);
    }

    #[test]
    fn test_degenerate_on_own_event() {
        let p = Parabola::new(0, DVec2::new(2.0, 4.0), 4.0);
        assert!(p.is_degenerate_line);

        let mut p = p;
        p.reset(6.0);
        assert!(!p.is_degenerate_line);
    }

    #[test]
    fn test_intersect_roots_lie_on_both() {
        let p1 = Parabola::new(0, DVec2::new(0.0, 1.0), 3.0);
        let p2 = Parabola::new(1, DVec2::new(2.0, 2.0), 3.0);

        let (r1, r2) = Parabola::intersect(&p1, &p2).unwrap();
        assert!(r1 < r2);
        for x in [r1, r2] {
            assert!((p1.evaluate(x) - p2.evaluate(x)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_intersect_equal_curvature() {
        // Same focus height means same curvature: the difference is linear and
        // the contract is to signal no intersection rather than solve it.
        let p1 = Parabola::new(0, DVec2::new(0.0, 1.0), 3.0);
        let p2 = Parabola::new(1, DVec2::new(4.0, 1.0), 3.0);
        assert!(Parabola::intersect(&p1, &p2).is_none());
    }

    #[test]
    fn test_intersect_ordered_roots() {
        let p1 = Parabola::new(0, DVec2::new(-1.0, 1.0), 4.0);
        let p2 = Parabola::new(1, DVec2::new(1.0, 2.0), 4.0);
        let (r1, r2) = Parabola::intersect(&p1, &p2).unwrap();
        assert!(r1.is_finite() && r2.is_finite());
        assert!(r1 <= r2);

        // Swapping the arguments gives the same pair of roots.
        let (s1, s2) = Parabola::intersect(&p2, &p1).unwrap();
        assert!((r1 - s1).abs() < 1e-9);
        assert!((r2 - s2).abs() < 1e-9);
    }
}
