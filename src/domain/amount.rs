use crate::error::{IpnError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Converts a decimal amount string (e.g. `"12.34"`) to minor currency units.
///
/// The amount is scaled by 100 and rounded half away from zero, so `"0.005"`
/// becomes `1`. `field` only labels the error.
///
/// Arithmetic is exact decimal, so a written midpoint always rounds up in
/// magnitude. This differs from multiplying an `f64` by 100 and rounding for
/// inputs whose binary value falls just below the midpoint: `"1.005"` gives
/// `101` here where the float route gives `100`.
pub fn to_minor_units(field: &'static str, value: &str) -> Result<i64> {
    let invalid = || IpnError::InvalidAmount {
        field,
        value: value.to_string(),
    };

    let amount = Decimal::from_str(value.trim()).map_err(|_| invalid())?;
    let scaled = amount
        .checked_mul(dec!(100))
        .ok_or_else(invalid)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    scaled.to_i64().ok_or_else(invalid)
}
