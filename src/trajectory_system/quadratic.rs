/// Solution set of `a*x^2 + b*x + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// Two real roots, `lo <= hi`. A double root repeats the value.
    Real(f64, f64),
    /// `a == 0`: the single root of `b*x + c = 0`.
    Linear(f64),
    /// Negative discriminant: `re ± im*i`.
    Complex { re: f64, im: f64 },
    /// `a == 0`, `b == 0`, `c != 0`: no solution.
    Degenerate,
    /// Every coefficient is zero: every `x` solves it.
    Indeterminate,
}

impl QuadraticRoots {
    /// Real candidates in ascending order.
    pub fn real_candidates(&self) -> [Option<f64>; 2] {
        match *self {
            QuadraticRoots::Real(lo, hi) => [Some(lo), Some(hi)],
            QuadraticRoots::Linear(x) => [Some(x), None],
            _ => [None, None],
        }
    }

    pub fn has_no_leading_terms(&self) -> bool {
        matches!(
            self,
            QuadraticRoots::Degenerate | QuadraticRoots::Indeterminate
        )
    }
}

pub fn solve_quadratic(a: f64, b: f64, c: f64) -> QuadraticRoots {
    if a == 0.0 {
        return if b != 0.0 {
            QuadraticRoots::Linear(-c / b)
        } else if c != 0.0 {
            QuadraticRoots::Degenerate
        } else {
            QuadraticRoots::Indeterminate
        };
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return QuadraticRoots::Complex {
            re: -b / (2.0 * a),
            im: (-discriminant).sqrt() / (2.0 * a).abs(),
        };
    }

    // q shares the sign of -b, so `-b ± sqrt(D)` never subtracts nearly equal values.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    if q == 0.0 {
        // b == 0 and D == 0, which forces c == 0.
        return QuadraticRoots::Real(0.0, 0.0);
    }

    let x1 = q / a;
    let x2 = c / q;
    if x1 <= x2 {
        QuadraticRoots::Real(x1, x2)
    } else {
        QuadraticRoots::Real(x2, x1)
    }
}

/// Picks the real, non-negative root closest to `reference`.
///
/// `reference` only ranks the candidates; it is never returned. Non-finite
/// candidates are skipped here and must be caught by the caller.
pub fn select_root(roots: &QuadraticRoots, reference: f64) -> Option<f64> {
    roots
        .real_candidates()
        .into_iter()
        .flatten()
        .filter(|root| root.is_finite() && *root >= 0.0)
        .fold(None, |best: Option<f64>, root| match best {
            Some(current) if (current - reference).abs() <= (root - reference).abs() => {
                Some(current)
            }
            _ => Some(root),
        })
}
