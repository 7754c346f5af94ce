use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance below which a balance is treated as settled.
///
/// All monetary amounts carry cent precision, so anything smaller than one
/// cent cannot be transferred and is considered effectively zero.
pub const SETTLEMENT_EPSILON: Decimal = dec!(0.01);

/// Round an amount to cent precision (2 decimal places).
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Whether an amount is effectively zero, i.e. its magnitude is below
/// [`SETTLEMENT_EPSILON`].
pub fn is_effectively_zero(amount: Decimal) -> bool {
    amount.abs() < SETTLEMENT_EPSILON
}

/// Render an amount as a currency string, e.g. `$12.50` or `-$0.75`.
///
/// Presentation helper only — the engine itself works on raw [`Decimal`]
/// values and never formats.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round2(amount);
    if rounded < Decimal::ZERO {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded)
    }
}
