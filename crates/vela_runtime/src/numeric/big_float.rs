//! Arbitrary-precision binary floating point.
//!
//! A finite value is `(-1)^negative * mantissa * 2^exponent` where the
//! mantissa holds at most `precision` bits and is kept odd, so two equal
//! values always have the same parts. Rounding is to nearest, ties to even.
//! Binary operations run at the larger precision of the two operands.
//! Magnitudes whose top bit lies outside `MIN_EXP..=MAX_EXP` overflow to an
//! infinity or underflow to a signed zero.

use super::float::ldexp;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use std::cmp::Ordering;

pub const F64_PRECISION: u32 = 53;
pub const MIN_PRECISION: u32 = 1;
pub const MAX_EXP: i64 = i32::MAX as i64;
pub const MIN_EXP: i64 = i32::MIN as i64;

/// Decimal exponents up to this size are scaled exactly.
const EXACT_SCALE_LIMIT: u64 = 1 << 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Class {
    Zero,
    Finite,
    Inf,
    NaN,
}

#[derive(Clone, Debug)]
pub struct BigFloat {
    class: Class,
    negative: bool,
    mantissa: BigUint,
    exponent: i64,
    precision: u32,
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

fn special(class: Class, negative: bool, precision: u32) -> BigFloat {
    BigFloat {
        class,
        negative,
        mantissa: BigUint::zero(),
        exponent: 0,
        precision: precision.max(MIN_PRECISION),
    }
}

impl BigFloat {
    pub fn zero(precision: u32) -> Self {
        special(Class::Zero, false, precision)
    }

    pub fn nan(precision: u32) -> Self {
        special(Class::NaN, false, precision)
    }

    pub fn infinity(negative: bool, precision: u32) -> Self {
        special(Class::Inf, negative, precision)
    }

    /// Rounds `mantissa * 2^exponent` to `precision` bits.
    pub fn from_parts(negative: bool, mantissa: BigUint, exponent: i64, precision: u32) -> Self {
        let precision = precision.max(MIN_PRECISION);
        if mantissa.is_zero() {
            return special(Class::Zero, negative, precision);
        }
        let mut m = mantissa;
        let mut e = exponent;
        let bits = m.bits();
        if bits > precision as u64 {
            let shift = bits - precision as u64;
            let half = BigUint::one() << (shift - 1);
            let mask = (BigUint::one() << shift) - BigUint::one();
            let rem = &m & &mask;
            m >>= shift;
            e = e.saturating_add(shift as i64);
            if rem > half || (rem == half && m.is_odd()) {
                m += 1u32;
                if m.bits() > precision as u64 {
                    m >>= 1u32;
                    e = e.saturating_add(1);
                }
            }
        }
        if let Some(tz) = m.trailing_zeros() {
            if tz > 0 {
                m >>= tz;
                e = e.saturating_add(tz as i64);
            }
        }
        let top = e.saturating_add(m.bits() as i64);
        if top > MAX_EXP {
            return Self::infinity(negative, precision);
        }
        if top < MIN_EXP {
            return special(Class::Zero, negative, precision);
        }
        BigFloat {
            class: Class::Finite,
            negative,
            mantissa: m,
            exponent: e,
            precision,
        }
    }

    fn from_signed(value: BigInt, exponent: i64, precision: u32) -> Self {
        let (sign, magnitude) = value.into_parts();
        Self::from_parts(sign == Sign::Minus, magnitude, exponent, precision)
    }

    pub fn from_f64(f: f64, precision: u32) -> Self {
        if f.is_nan() {
            return Self::nan(precision);
        }
        if f.is_infinite() {
            return Self::infinity(f < 0.0, precision);
        }
        if f == 0.0 {
            return special(Class::Zero, f.is_sign_negative(), precision);
        }
        let bits = f.to_bits();
        let negative = bits >> 63 == 1;
        let exp_bits = ((bits >> 52) & 0x7ff) as i64;
        let frac = bits & ((1u64 << 52) - 1);
        let (m, e) = if exp_bits == 0 {
            (frac, -1074)
        } else {
            (frac | (1u64 << 52), exp_bits - 1075)
        };
        Self::from_parts(negative, BigUint::from(m), e, precision)
    }

    pub fn from_bigint(value: &BigInt, precision: u32) -> Self {
        Self::from_signed(value.clone(), 0, precision)
    }

    pub fn from_i64(value: i64, precision: u32) -> Self {
        Self::from_signed(BigInt::from(value), 0, precision)
    }

    /// Parses decimal notation (`-12.5e-3`) or `NaN`, `Inf`, `+Inf`, `-Inf`.
    pub fn parse(text: &str, precision: u32) -> Option<Self> {
        let s = text.trim().replace('_', "");
        match s.as_str() {
            "NaN" => return Some(Self::nan(precision)),
            "Inf" | "+Inf" => return Some(Self::infinity(false, precision)),
            "-Inf" => return Some(Self::infinity(true, precision)),
            _ => {}
        }
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(&s)),
        };
        let (num, exp10) = match body.find(['e', 'E']) {
            Some(pos) => (&body[..pos], body[pos + 1..].parse::<i64>().ok()?),
            None => (body, 0),
        };
        let (int_part, frac_part) = match num.find('.') {
            Some(pos) => (&num[..pos], &num[pos + 1..]),
            None => (num, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = format!("{}{}", int_part, frac_part);
        let value = BigUint::parse_bytes(digits.as_bytes(), 10)?;
        let scale = exp10.checked_sub(frac_part.len() as i64)?;
        let parsed = Self::from_decimal(value, scale, precision);
        Some(if negative { parsed.negate() } else { parsed })
    }

    /// `digits * 10^scale`, rounded. Small scales are exact; larger ones
    /// scale by a power of ten computed at a widened precision.
    fn from_decimal(digits: BigUint, scale: i64, precision: u32) -> Self {
        if digits.is_zero() {
            return Self::zero(precision);
        }
        if scale.unsigned_abs() <= EXACT_SCALE_LIMIT {
            let pow = BigUint::from(10u32).pow(scale.unsigned_abs() as u32);
            if scale >= 0 {
                return Self::from_parts(false, digits * pow, 0, precision);
            }
            return Self::divide_magnitudes(false, &digits, 0, &pow, 0, precision);
        }
        let working = precision.saturating_add(64);
        let value = Self::from_parts(false, digits, 0, working);
        let pow = Self::from_i64(10, working).pow_int(scale.saturating_abs());
        let scaled = if scale > 0 {
            value.multiply(&pow)
        } else {
            value.divide(&pow)
        };
        scaled.with_precision(precision)
    }

    /// Quotient of two positive magnitudes with a sticky bit for correct rounding.
    fn divide_magnitudes(
        negative: bool,
        num: &BigUint,
        num_exp: i64,
        den: &BigUint,
        den_exp: i64,
        precision: u32,
    ) -> Self {
        let want = precision as i64 + 2 + den.bits() as i64 - num.bits() as i64;
        let shift = want.max(0) as u64;
        let (q, r) = (num << shift).div_rem(den);
        let (q, extra) = if r.is_zero() {
            (q, 0)
        } else {
            ((q << 1u32) | BigUint::one(), 1)
        };
        let exponent = num_exp
            .saturating_sub(den_exp)
            .saturating_sub(shift as i64)
            .saturating_sub(extra);
        Self::from_parts(negative, q, exponent, precision)
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn with_precision(&self, precision: u32) -> Self {
        match self.class {
            Class::Finite => Self::from_parts(
                self.negative,
                self.mantissa.clone(),
                self.exponent,
                precision,
            ),
            class => special(class, self.negative, precision),
        }
    }

    pub fn is_nan(&self) -> bool {
        self.class == Class::NaN
    }

    pub fn is_infinite(&self) -> bool {
        self.class == Class::Inf
    }

    pub fn is_zero(&self) -> bool {
        self.class == Class::Zero
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.class, Class::Zero | Class::Finite)
    }

    pub fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// True for finite values without a fractional part.
    pub fn is_integer(&self) -> bool {
        match self.class {
            Class::Zero => true,
            Class::Finite => self.exponent >= 0,
            _ => false,
        }
    }

    fn signed_mantissa(&self) -> BigInt {
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, self.mantissa.clone())
    }

    /// Truncates toward zero. `None` for NaN and infinities.
    pub fn to_bigint(&self) -> Option<BigInt> {
        match self.class {
            Class::Zero => Some(BigInt::zero()),
            Class::Finite => {
                let m = self.signed_mantissa();
                if self.exponent >= 0 {
                    Some(m << self.exponent as u64)
                } else {
                    let shift = self.exponent.unsigned_abs();
                    if shift > self.mantissa.bits() {
                        return Some(BigInt::zero());
                    }
                    let magnitude = &self.mantissa >> shift;
                    let sign = if self.negative { Sign::Minus } else { Sign::Plus };
                    Some(BigInt::from_biguint(sign, magnitude))
                }
            }
            _ => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self.class {
            Class::NaN => f64::NAN,
            Class::Inf => {
                if self.negative {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            Class::Zero => {
                if self.negative {
                    -0.0
                } else {
                    0.0
                }
            }
            Class::Finite => {
                let rounded = self.with_precision(F64_PRECISION);
                let m = rounded.mantissa.to_u64().unwrap_or(0) as f64;
                let x = ldexp(m, rounded.exponent);
                if self.negative { -x } else { x }
            }
        }
    }

    pub fn negate(&self) -> Self {
        let mut out = self.clone();
        if out.class != Class::NaN {
            out.negative = !out.negative;
        }
        out
    }

    pub fn abs(&self) -> Self {
        let mut out = self.clone();
        out.negative = false;
        out
    }

    /// Position just above the most significant bit.
    fn top(&self) -> i64 {
        self.exponent + self.mantissa.bits() as i64
    }

    pub fn add(&self, other: &Self) -> Self {
        let precision = self.precision.max(other.precision);
        match (self.class, other.class) {
            (Class::NaN, _) | (_, Class::NaN) => Self::nan(precision),
            (Class::Inf, Class::Inf) => {
                if self.negative == other.negative {
                    Self::infinity(self.negative, precision)
                } else {
                    Self::nan(precision)
                }
            }
            (Class::Inf, _) => Self::infinity(self.negative, precision),
            (_, Class::Inf) => Self::infinity(other.negative, precision),
            (Class::Zero, Class::Zero) => {
                special(Class::Zero, self.negative && other.negative, precision)
            }
            (Class::Zero, _) => other.with_precision(precision),
            (_, Class::Zero) => self.with_precision(precision),
            (Class::Finite, Class::Finite) => {
                // An operand entirely below half an ulp of the other cannot
                // change the rounded sum.
                let guard = precision as i64 + 3;
                if other.top() + guard < self.top() {
                    return self.with_precision(precision);
                }
                if self.top() + guard < other.top() {
                    return other.with_precision(precision);
                }
                let e = self.exponent.min(other.exponent);
                let a = self.signed_mantissa() << (self.exponent - e) as u64;
                let b = other.signed_mantissa() << (other.exponent - e) as u64;
                Self::from_signed(a + b, e, precision)
            }
        }
    }

    pub fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    pub fn multiply(&self, other: &Self) -> Self {
        let precision = self.precision.max(other.precision);
        let negative = self.negative != other.negative;
        match (self.class, other.class) {
            (Class::NaN, _) | (_, Class::NaN) => Self::nan(precision),
            (Class::Inf, Class::Zero) | (Class::Zero, Class::Inf) => Self::nan(precision),
            (Class::Inf, _) | (_, Class::Inf) => Self::infinity(negative, precision),
            (Class::Zero, _) | (_, Class::Zero) => special(Class::Zero, negative, precision),
            (Class::Finite, Class::Finite) => Self::from_parts(
                negative,
                &self.mantissa * &other.mantissa,
                self.exponent.saturating_add(other.exponent),
                precision,
            ),
        }
    }

    pub fn divide(&self, other: &Self) -> Self {
        let precision = self.precision.max(other.precision);
        let negative = self.negative != other.negative;
        match (self.class, other.class) {
            (Class::NaN, _) | (_, Class::NaN) => Self::nan(precision),
            (Class::Inf, Class::Inf) | (Class::Zero, Class::Zero) => Self::nan(precision),
            (Class::Inf, _) => Self::infinity(negative, precision),
            (_, Class::Inf) => special(Class::Zero, negative, precision),
            (_, Class::Zero) => Self::infinity(negative, precision),
            (Class::Zero, _) => special(Class::Zero, negative, precision),
            (Class::Finite, Class::Finite) => Self::divide_magnitudes(
                negative,
                &self.mantissa,
                self.exponent,
                &other.mantissa,
                other.exponent,
                precision,
            ),
        }
    }

    /// Floored modulo, computed exactly and then rounded.
    pub fn modulo(&self, other: &Self) -> Self {
        let precision = self.precision.max(other.precision);
        match (self.class, other.class) {
            (Class::NaN, _) | (_, Class::NaN) | (Class::Inf, _) | (_, Class::Zero) => {
                Self::nan(precision)
            }
            (Class::Zero, _) => special(Class::Zero, other.negative, precision),
            (Class::Finite, Class::Inf) => {
                if self.negative == other.negative {
                    self.with_precision(precision)
                } else {
                    Self::infinity(other.negative, precision)
                }
            }
            (Class::Finite, Class::Finite) => {
                let e = self.exponent.min(other.exponent);
                let a = self.signed_mantissa() << (self.exponent - e) as u64;
                let b = other.signed_mantissa() << (other.exponent - e) as u64;
                let r = a.mod_floor(&b);
                if r.is_zero() {
                    return special(Class::Zero, other.negative, precision);
                }
                Self::from_signed(r, e, precision)
            }
        }
    }

    /// Raises to an integer power by repeated squaring at a widened working
    /// precision. IEEE special cases go through `f64::powf`.
    pub fn pow_int(&self, exp: i64) -> Self {
        let precision = self.precision;
        if exp == 0 {
            return Self::from_i64(1, precision);
        }
        if self.class != Class::Finite {
            return Self::from_f64(self.to_f64().powf(exp as f64), precision);
        }
        let working = precision.saturating_add(32);
        let mut base = self.with_precision(working);
        let mut acc = Self::from_i64(1, working);
        let mut n = exp.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                acc = acc.multiply(&base);
            }
            n >>= 1;
            if n > 0 {
                base = base.multiply(&base);
            }
        }
        if exp < 0 {
            acc = Self::from_i64(1, working).divide(&acc);
        }
        acc.with_precision(precision)
    }

    pub fn pow(&self, other: &Self) -> Self {
        let precision = self.precision.max(other.precision);
        if other.is_integer() && self.class == Class::Finite {
            if let Some(exp) = other.to_bigint().and_then(|e| e.to_i64()) {
                return self.with_precision(precision).pow_int(exp);
            }
        }
        Self::from_f64(self.to_f64().powf(other.to_f64()), precision)
    }

    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self.class, other.class) {
            (Class::NaN, _) | (_, Class::NaN) => None,
            (Class::Zero, Class::Zero) => Some(Ordering::Equal),
            _ => {
                let sa = self.sign_rank();
                let sb = other.sign_rank();
                if sa != sb {
                    return Some(sa.cmp(&sb));
                }
                let magnitude = self.compare_magnitude(other);
                Some(if self.negative { magnitude.reverse() } else { magnitude })
            }
        }
    }

    fn sign_rank(&self) -> i8 {
        match self.class {
            Class::Zero => 0,
            _ if self.negative => -1,
            _ => 1,
        }
    }

    fn compare_magnitude(&self, other: &Self) -> Ordering {
        match (self.class, other.class) {
            (Class::Inf, Class::Inf) => Ordering::Equal,
            (Class::Inf, _) => Ordering::Greater,
            (_, Class::Inf) => Ordering::Less,
            _ => {
                let top = self.top().cmp(&other.top());
                if top != Ordering::Equal {
                    return top;
                }
                let e = self.exponent.min(other.exponent);
                let a = &self.mantissa << (self.exponent - e) as u64;
                let b = &other.mantissa << (other.exponent - e) as u64;
                a.cmp(&b)
            }
        }
    }

    /// Decimal text without a type suffix, with as many significant digits as
    /// the precision can always represent.
    pub fn to_decimal_string(&self) -> String {
        match self.class {
            Class::NaN => return "NaN".to_string(),
            Class::Inf => return if self.negative { "-Inf" } else { "+Inf" }.to_string(),
            Class::Zero => return if self.negative { "-0.0" } else { "0.0" }.to_string(),
            Class::Finite => {}
        }
        let (integer, point_shift) = if self.exponent >= 0 {
            (&self.mantissa << self.exponent as u64, 0i64)
        } else {
            let k = self.exponent.unsigned_abs();
            (&self.mantissa * BigUint::from(5u32).pow(k as u32), k as i64)
        };
        let all = integer.to_str_radix(10);
        let mut point = all.len() as i64 - point_shift;
        let significant = ((self.precision as f64 * std::f64::consts::LOG10_2).floor() as usize).max(1);
        let mut digits: Vec<u8> = all.into_bytes();
        if digits.len() > significant {
            let round_up = digits[significant] >= b'5';
            digits.truncate(significant);
            if round_up {
                let mut i = significant;
                loop {
                    if i == 0 {
                        digits.insert(0, b'1');
                        digits.pop();
                        point += 1;
                        break;
                    }
                    i -= 1;
                    if digits[i] == b'9' {
                        digits[i] = b'0';
                    } else {
                        digits[i] += 1;
                        break;
                    }
                }
            }
        }
        while digits.len() > 1 && digits.last() == Some(&b'0') {
            digits.pop();
        }
        let digits = String::from_utf8(digits).unwrap_or_default();
        let body = layout_decimal(&digits, point);
        if self.negative { format!("-{}", body) } else { body }
    }
}

/// Places the decimal point in `digits` (value `0.digits * 10^point`),
/// switching to scientific notation for very large or small magnitudes.
fn layout_decimal(digits: &str, point: i64) -> String {
    let n = digits.len() as i64;
    let exp10 = point - 1;
    if !(-5..21).contains(&exp10) {
        let (head, tail) = digits.split_at(1);
        let tail = if tail.is_empty() { "0" } else { tail };
        let sign = if exp10 < 0 { '-' } else { '+' };
        return format!("{}.{}e{}{:02}", head, tail, sign, exp10.unsigned_abs());
    }
    if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point >= n {
        format!("{}{}.0", digits, "0".repeat((point - n) as usize))
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    }
}
