//! IEEE-754 helpers shared by `Float`, `Float32` and `Float64`.

use num_traits::Float;
use std::cmp::Ordering;

/// Floored modulo. The result takes the sign of the divisor, and a finite
/// dividend modulo an infinite divisor of the other sign yields that infinity.
pub fn floor_mod<F: Float>(a: F, b: F) -> F {
    if a.is_nan() || b.is_nan() || a.is_infinite() || b.is_zero() {
        return F::nan();
    }
    if b.is_infinite() {
        if a.is_zero() || a.is_sign_negative() == b.is_sign_negative() {
            return a;
        }
        return b;
    }
    let r = a % b;
    if !r.is_zero() && (r < F::zero()) != (b < F::zero()) {
        r + b
    } else {
        r
    }
}

/// `pow` with the C99 special cases: `pow(±0, -odd) = ±Inf`,
/// `pow(x, +Inf) = +Inf` for `|x| > 1`, `pow(1, NaN) = 1`.
pub fn pow<F: Float>(a: F, b: F) -> F {
    a.powf(b)
}

/// Three-way comparison; `None` when either side is NaN.
pub fn compare<F: Float>(a: F, b: F) -> Option<Ordering> {
    a.partial_cmp(&b)
}

/// Shortest round-trip text for `f`, with `NaN`, `+Inf` and `-Inf` spelled out.
pub fn format_f64(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let mut buf = ryu::Buffer::new();
    buf.format_finite(f).to_string()
}

pub fn format_f32(f: f32) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let mut buf = ryu::Buffer::new();
    buf.format_finite(f).to_string()
}

/// Multiplies `x` by `2^exp` without overflowing the intermediate power.
pub fn ldexp(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP {
        x *= 2f64.powi(STEP as i32);
        exp -= STEP;
        if x.is_infinite() {
            return x;
        }
    }
    while exp < -STEP {
        x *= 2f64.powi(-STEP as i32);
        exp += STEP;
        if x == 0.0 {
            return x;
        }
    }
    x * 2f64.powi(exp as i32)
}
