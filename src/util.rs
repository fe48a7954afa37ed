/// Numeric conversion helpers and the gamma function.
///
/// The conversions never lose data silently: each returns an error when the
/// value is out of range, not finite, or not an integer where one is needed.
/// The factorial operator of the complex configuration is built on
/// [`num::factorial`].
pub mod num;
