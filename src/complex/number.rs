use std::{
    cmp::Ordering,
    fmt::Display,
    hash::{Hash, Hasher},
    ops,
};

use ordered_float::OrderedFloat;

use crate::{
    error::{ErrorKind, ExprError, ExprResult},
    util::num::f64_to_i64_checked,
};

/// `0.0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1.0` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);
/// The imaginary unit.
pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

/// Represents a complex number with real and imaginary parts.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.real, self.imaginary) {
            (0.0, 0.0) => write!(f, "0"),
            (real, 0.0) => write!(f, "{real}"),
            (0.0, imaginary) => write!(f, "{imaginary}i",),
            (real, imaginary) if imaginary > 0.0 => write!(f, "{real}+{imaginary}i"),
            (real, imaginary) => write!(f, "{real}-{}i", -imaginary),
        }
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.real, 5.0);
    /// assert_eq!(c.imaginary, -1.0);
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Whether the imaginary part is below `tolerance` in magnitude.
    #[must_use]
    pub fn is_real(&self, tolerance: f64) -> bool {
        self.imaginary.abs() < tolerance
    }

    /// Returns the absolute value (magnitude) of the complex number.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let c = ComplexNumber::new(3.0, 4.0);
    /// assert_eq!(c.abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// Returns the complex conjugate of the number.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let c = ComplexNumber::new(1.0, 5.0);
    /// assert_eq!(c.conj(), ComplexNumber::new(1.0, -5.0));
    /// ```
    #[must_use]
    pub const fn conj(&self) -> Self {
        Self { real:      self.real,
               imaginary: -self.imaginary, }
    }

    /// Returns the reciprocal (1/z) of the complex number.
    #[must_use]
    pub const fn recip(&self) -> Self {
        let coj_squared = self.real * self.real + self.imaginary * self.imaginary;

        Self { real:      self.real / coj_squared,
               imaginary: -(self.imaginary / coj_squared), }
    }

    /// Returns the argument (phase angle) in radians.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let c = ComplexNumber::new(0.0, 1.0);
    /// assert!((c.arg() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    /// Divides, refusing an exact zero divisor.
    ///
    /// # Example
    /// ```
    /// use infixa::{complex::ComplexNumber, error::ErrorKind};
    ///
    /// let six = ComplexNumber::from(6.0);
    /// assert_eq!(six.checked_div(ComplexNumber::from(3.0)).unwrap(), ComplexNumber::from(2.0));
    ///
    /// let err = six.checked_div(ComplexNumber::from(0.0)).unwrap_err();
    /// assert_eq!(err.kind(), &ErrorKind::DivisionByZero);
    /// ```
    pub fn checked_div(self, rhs: Self) -> ExprResult<Self> {
        if rhs.real == 0.0 && rhs.imaginary == 0.0 {
            return Err(ExprError::new(ErrorKind::DivisionByZero));
        }
        Ok(self / rhs)
    }

    /// Raises the complex number to an integer power.
    ///
    /// Performs repeated squaring with overflow and division-by-zero checks.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::{ComplexNumber, ONE};
    /// let c = ComplexNumber::new(2.0, 0.0);
    /// assert_eq!(c.checked_powi(0).unwrap(), ONE);
    /// assert_eq!(c.checked_powi(9).unwrap(), ComplexNumber::new(512.0, 0.0));
    /// assert_eq!(c.checked_powi(-1).unwrap(), ComplexNumber::new(0.5, 0.0));
    /// ```
    pub fn checked_powi(self, exp: i64) -> ExprResult<Self> {
        if exp == 0 {
            return Ok(ONE);
        }

        if self.real == 0.0 && self.imaginary == 0.0 && exp < 0 {
            return Err(ExprError::new(ErrorKind::DivisionByZero));
        }

        let mut base = self;
        let mut result = ONE;
        let mut n = exp.unsigned_abs();

        while n > 0 {
            if n % 2 == 1 {
                result *= base;
                result.check_finite()?;
            }
            n /= 2;
            if n > 0 {
                base = base * base;
                base.check_finite()?;
            }
        }

        if exp < 0 {
            result = result.recip();
            result.check_finite()?;
        }

        Ok(result)
    }

    /// Raises the complex number to a complex power, using the principal
    /// logarithm.
    ///
    /// Integral real exponents go through [`ComplexNumber::checked_powi`] and
    /// are exact.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::{ComplexNumber, I};
    ///
    /// let minus_one = ComplexNumber::from(-1.0);
    /// let root = minus_one.checked_pow(ComplexNumber::from(0.5)).unwrap();
    /// assert!(root.real.abs() < 1e-12 && (root.imaginary - 1.0).abs() < 1e-12);
    ///
    /// // i^i is real
    /// let ii = I.checked_pow(I).unwrap();
    /// assert!((ii.real - (-std::f64::consts::FRAC_PI_2).exp()).abs() < 1e-12);
    /// ```
    pub fn checked_pow(self, exp: Self) -> ExprResult<Self> {
        if exp.imaginary == 0.0
           && let Ok(n) = f64_to_i64_checked(exp.real)
        {
            return self.checked_powi(n);
        }

        if self.real == 0.0 && self.imaginary == 0.0 {
            return if exp.real > 0.0 {
                Ok(ZERO)
            } else {
                Err(ExprError::new(ErrorKind::DivisionByZero))
            };
        }

        let result = (exp * self.ln()).exp();
        result.check_finite()?;
        Ok(result)
    }

    /// Raises the complex number to a floating-point power.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let c = ComplexNumber::new(4.0, 0.0);
    /// let res = c.powf(0.5);
    /// assert!((res.real - 2.0).abs() < 1e-10);
    /// assert!(res.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn powf(self, exp: f64) -> Self {
        let r = self.abs();
        let theta = self.arg();

        let new_r = r.powf(exp);
        let new_theta = theta * exp;

        Self { real:      new_r * new_theta.cos(),
               imaginary: new_r * new_theta.sin(), }
    }

    /// Returns the principal square root of the complex number.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let s = ComplexNumber::new(-9.0, 0.0).sqrt();
    /// assert!(s.real.abs() < 1e-10);
    /// assert!((s.imaginary - 3.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        let a = self.real;
        let b = self.imaginary;
        let r = a.hypot(b);

        let real = f64::midpoint(r, a).sqrt();
        let imaginary = ((r - a) / 2.0).sqrt();
        // A negative zero imaginary part still takes the upper root.
        let imaginary = if b < 0.0 { -imaginary } else { imaginary };

        Self { real, imaginary }
    }

    /// Returns the principal cube root, `z^(1/3)`.
    ///
    /// For a negative real number this is not the real root.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let c = ComplexNumber::new(27.0, 0.0).cbrt();
    /// assert!((c.real - 3.0).abs() < 1e-10);
    ///
    /// let c = ComplexNumber::new(-8.0, 0.0).cbrt();
    /// assert!((c.real - 1.0).abs() < 1e-10);
    /// assert!((c.imaginary - 3.0_f64.sqrt()).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn cbrt(self) -> Self {
        self.powf(1.0 / 3.0)
    }

    /// Returns the sine of the complex number.
    #[must_use]
    pub fn sin(self) -> Self {
        Self { real:      self.real.sin() * self.imaginary.cosh(),
               imaginary: self.real.cos() * self.imaginary.sinh(), }
    }

    /// Returns the cosine of the complex number.
    #[must_use]
    pub fn cos(self) -> Self {
        Self { real:      self.real.cos() * self.imaginary.cosh(),
               imaginary: -self.real.sin() * self.imaginary.sinh(), }
    }

    /// Returns the tangent of the complex number.
    #[must_use]
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    /// Returns the principal arcsine, `-i ln(iz + sqrt(1 - z²))`.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let z = ComplexNumber::from(1.0).asin();
    /// assert!((z.real - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    /// assert!(z.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn asin(self) -> Self {
        -I * (I * self + (ONE - self * self).sqrt()).ln()
    }

    /// Returns the principal arccosine, `π/2 - asin(z)`.
    #[must_use]
    pub fn acos(self) -> Self {
        Self::from(std::f64::consts::FRAC_PI_2) - self.asin()
    }

    /// Returns the principal arctangent, `(i/2)(ln(1 - iz) - ln(1 + iz))`.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let z = ComplexNumber::from(1.0).atan();
    /// assert!((z.real - std::f64::consts::FRAC_PI_4).abs() < 1e-10);
    /// assert!(z.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn atan(self) -> Self {
        let iz = I * self;
        I * Self::from(0.5) * ((ONE - iz).ln() - (ONE + iz).ln())
    }

    /// Returns the hyperbolic sine of the complex number.
    #[must_use]
    pub fn sinh(self) -> Self {
        Self { real:      self.real.sinh() * self.imaginary.cos(),
               imaginary: self.real.cosh() * self.imaginary.sin(), }
    }

    /// Returns the hyperbolic cosine of the complex number.
    #[must_use]
    pub fn cosh(self) -> Self {
        Self { real:      self.real.cosh() * self.imaginary.cos(),
               imaginary: self.real.sinh() * self.imaginary.sin(), }
    }

    /// Returns the hyperbolic tangent of the complex number.
    #[must_use]
    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    /// Returns the exponential of the complex number.
    ///
    /// # Example
    /// ```
    /// use infixa::complex::ComplexNumber;
    /// let z = ComplexNumber::new(0.0, std::f64::consts::PI).exp();
    /// assert!((z.real + 1.0).abs() < 1e-10);
    /// assert!(z.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn exp(self) -> Self {
        let exp_r = self.real.exp();
        Self { real:      exp_r * self.imaginary.cos(),
               imaginary: exp_r * self.imaginary.sin(), }
    }

    /// Returns the natural logarithm (ln) of the complex number.
    #[must_use]
    pub fn ln(self) -> Self {
        Self { real:      self.abs().ln(),
               imaginary: self.arg(), }
    }

    fn check_finite(&self) -> ExprResult<()> {
        if self.real.is_finite() && self.imaginary.is_finite() {
            Ok(())
        } else {
            Err(ExprError::domain("Overflow"))
        }
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::AddAssign for ComplexNumber {
    fn add_assign(&mut self, rhs: Self) {
        self.real += rhs.real;
        self.imaginary += rhs.imaginary;
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::MulAssign for ComplexNumber {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary) / denom,
               imaginary: self.imaginary
                              .mul_add(rhs.real, -(self.real * rhs.imaginary))
                          / denom, }
    }
}

impl<T> From<T> for ComplexNumber where T: Into<f64>
{
    fn from(value: T) -> Self {
        Self { real:      value.into(),
               imaginary: 0.0, }
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.real) == OrderedFloat(other.real)
        && OrderedFloat(self.imaginary) == OrderedFloat(other.imaginary)
    }
}

impl Eq for ComplexNumber {}

impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.real).hash(state);
        OrderedFloat(self.imaginary).hash(state);
    }
}

impl PartialOrd for ComplexNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComplexNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.real).cmp(&OrderedFloat(other.real))
                               .then_with(|| OrderedFloat(self.imaginary).cmp(&OrderedFloat(other.imaginary)))
    }
}
