use crate::error::{ExprError, ExprResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Largest argument whose factorial is finite as an `f64`.
pub const MAX_FACTORIAL_ARG: u64 = 170;

/// Safely converts a `u64` to `f64` if and only if it is exactly representable.
///
/// ## Errors
/// Returns a domain error if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use infixa::util::num::{MAX_SAFE_U64_INT, u64_to_f64_checked};
///
/// assert_eq!(u64_to_f64_checked(1234).unwrap(), 1234.0);
/// assert!(u64_to_f64_checked(MAX_SAFE_U64_INT + 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn u64_to_f64_checked(value: u64) -> ExprResult<f64> {
    if value > MAX_SAFE_U64_INT {
        return Err(ExprError::domain(format!("{value} is too large to be represented exactly")));
    }
    Ok(value as f64)
}

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns a domain error if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use infixa::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(8).unwrap(), 8.0);
/// ```
pub fn usize_to_f64_checked(value: usize) -> ExprResult<f64> {
    u64::try_from(value).map_err(|_| ExprError::domain(format!("{value} is too large to be represented exactly")))
                        .and_then(u64_to_f64_checked)
}

/// Safely converts an `f64` to `i64` if the value is finite, integral and in
/// range.
///
/// ## Errors
/// Returns a domain error for non-finite, out-of-range or fractional values.
///
/// ## Example
/// ```
/// use infixa::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(-3.0).unwrap(), -3);
/// assert!(f64_to_i64_checked(1.5).is_err());
/// assert!(f64_to_i64_checked(f64::NAN).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64) -> ExprResult<i64> {
    if !value.is_finite() {
        return Err(ExprError::domain(format!("Cannot convert non-finite value {value} to an integer")));
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(ExprError::domain(format!("{value} is out of the integer range")));
    }
    if value.fract() != 0.0 {
        return Err(ExprError::domain(format!("{value} is not an integer")));
    }
    Ok(value as i64)
}

/// Safely converts an `f64` to `u64` if the value is finite, non-negative,
/// exactly representable and not fractional.
///
/// ## Errors
/// Returns a domain error for non-finite, negative, out-of-range or
/// fractional values.
///
/// ## Example
/// ```
/// use infixa::util::num::f64_to_u64_checked;
///
/// assert_eq!(f64_to_u64_checked(7.0).unwrap(), 7);
/// assert!(f64_to_u64_checked(-5.0).is_err());
/// assert!(f64_to_u64_checked(1.23).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_u64_checked(value: f64) -> ExprResult<u64> {
    if !value.is_finite() {
        return Err(ExprError::domain(format!("Cannot convert non-finite value {value} to an integer")));
    }
    if value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(ExprError::domain(format!("{value} is out of the integer range")));
    }
    if value.fract() != 0.0 {
        return Err(ExprError::domain(format!("{value} is not an integer")));
    }
    Ok(value as u64)
}

/// Computes the gamma function Γ(z) using the Lanczos approximation.
///
/// Uses the standard 9-term Lanczos coefficients (`g = 7`). For `z < 0.5`
/// the reflection formula `Γ(z) = π / (sin(πz) * Γ(1 − z))` is applied.
///
/// ## Errors
/// Returns a domain error at the poles, zero and the negative integers.
///
/// ## Example
/// ```
/// use infixa::util::num::euler_gamma;
///
/// // Γ(5) = 4! = 24
/// assert!((euler_gamma(5.0).unwrap() - 24.0).abs() < 1e-9);
/// // Γ(1/2) = √π
/// assert!((euler_gamma(0.5).unwrap() - std::f64::consts::PI.sqrt()).abs() < 1e-10);
/// assert!(euler_gamma(-2.0).is_err());
/// ```
pub fn euler_gamma(z: f64) -> ExprResult<f64> {
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z <= 0.0 && z.fract() == 0.0 {
        return Err(ExprError::domain(format!("The gamma function has a pole at {z}")));
    }

    if z < 0.5 {
        Ok(std::f64::consts::PI / ((std::f64::consts::PI * z).sin() * euler_gamma(1.0 - z)?))
    } else {
        let z_minus_1 = z - 1.0;
        let mut x = COEFFS[0];

        for (i, &c) in COEFFS.iter().enumerate().skip(1) {
            x += c / (z_minus_1 + usize_to_f64_checked(i)?);
        }

        let t = z_minus_1 + G + 0.5;

        Ok(std::f64::consts::TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x)
    }
}

/// Computes `x!` for a real `x`.
///
/// Non-negative integers up to [`MAX_FACTORIAL_ARG`] use the exact product;
/// every other argument goes through `Γ(x + 1)`.
///
/// ## Errors
/// Returns a domain error for negative integers, where the factorial is
/// undefined.
///
/// ## Example
/// ```
/// use infixa::util::num::factorial;
///
/// assert_eq!(factorial(5.0).unwrap(), 120.0);
/// assert_eq!(factorial(0.0).unwrap(), 1.0);
/// assert!((factorial(0.5).unwrap() - 0.886_226_925_452_758).abs() < 1e-9);
/// assert!(factorial(-1.0).is_err());
/// ```
pub fn factorial(x: f64) -> ExprResult<f64> {
    if let Ok(n) = f64_to_u64_checked(x)
       && n <= MAX_FACTORIAL_ARG
    {
        let mut result = 1.0;
        for k in 2..=n {
            result *= u64_to_f64_checked(k)?;
        }
        return Ok(result);
    }

    euler_gamma(x + 1.0)
}
