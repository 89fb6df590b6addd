//! Brent's method for locating event crossings inside a step.

/// Absolute time tolerance for a located crossing.
const TIME_TOL: f64 = 1e-12;

const MAX_ITERS: usize = 100;

/// The event function was not finite at this time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct NonFinite(pub(super) f64);

/// Finds a zero of `f` between `a` and `b`.
///
/// `fa` and `fb` are `f(a)` and `f(b)` and must not share a strict sign.
/// Combines inverse quadratic interpolation and the secant step, falling
/// back to bisection whenever the interpolated step leaves the bracket or
/// shrinks it too slowly.
pub(super) fn find_root<F>(mut f: F, a: f64, b: f64, fa: f64, fb: f64) -> Result<f64, NonFinite>
where
    F: FnMut(f64) -> f64,
{
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let (mut a, mut b, mut c) = (a, b, b);
    let (mut fa, mut fb, mut fc) = (fa, fb, fb);
    let (mut d, mut e) = (b - a, b - a);

    for _ in 0..MAX_ITERS {
        // Keep the root between b and c.
        if (fb > 0.0) == (fc > 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        // Keep b as the best estimate.
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * TIME_TOL;
        let half = 0.5 * (c - b);
        if half.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            #[allow(clippy::float_cmp)]
            let (mut p, mut q) = if a == c {
                (2.0 * half * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let limit = (3.0 * half * q - (tol * q).abs()).min((e * q).abs());
            if 2.0 * p < limit {
                e = d;
                d = p / q;
            } else {
                d = half;
                e = d;
            }
        } else {
            d = half;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(half) };
        fb = f(b);
        if !fb.is_finite() {
            return Err(NonFinite(b));
        }
    }

    Ok(b)
}
