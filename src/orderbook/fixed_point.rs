//! Fixed-point scales and their decimal shifts.
//!
//! The feed delivers prices with 8 implied decimals, sizes with 6 and
//! percentages with 4. These helpers only move the decimal point; turning
//! strings into integers is the codec's job.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Implied decimals of a price
pub const PRICE_SCALE: u32 = 8;
/// Implied decimals of a size
pub const SIZE_SCALE: u32 = 6;
/// Implied decimals of a percentage
pub const PERCENTAGE_SCALE: u32 = 4;

/// Fixed-point price as a decimal
#[inline]
pub fn price_to_decimal(price: i64) -> Decimal {
    Decimal::new(price, PRICE_SCALE)
}

/// Fixed-point size as a decimal
#[inline]
pub fn size_to_decimal(size: i64) -> Decimal {
    Decimal::new(size, SIZE_SCALE)
}

/// Fixed-point percentage as a decimal
#[inline]
pub fn percentage_to_decimal(percentage: i32) -> Decimal {
    Decimal::new(i64::from(percentage), PERCENTAGE_SCALE)
}

fn shift_truncate(value: Decimal, scale: u32) -> Option<i64> {
    let factor = Decimal::from(10_i64.checked_pow(scale)?);
    value.checked_mul(factor)?.trunc().to_i64()
}

/// Decimal price as fixed-point, truncated toward zero.
///
/// `None` when the value does not fit.
pub fn decimal_to_price(value: Decimal) -> Option<i64> {
    shift_truncate(value, PRICE_SCALE)
}

/// Decimal size as fixed-point, truncated toward zero.
pub fn decimal_to_size(value: Decimal) -> Option<i64> {
    shift_truncate(value, SIZE_SCALE)
}

/// Decimal percentage as fixed-point, truncated toward zero.
pub fn decimal_to_percentage(value: Decimal) -> Option<i32> {
    shift_truncate(value, PERCENTAGE_SCALE)?.to_i32()
}

/// Return on investment in percent: `(earned - spent) / spent * 100`.
///
/// `None` when `spent` is zero.
pub fn roi(spent: Decimal, earned: Decimal) -> Option<Decimal> {
    earned
        .checked_sub(spent)?
        .checked_div(spent)?
        .checked_mul(Decimal::ONE_HUNDRED)
}
