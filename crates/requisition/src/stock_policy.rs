use rust_decimal::Decimal;

/// Suggested stock level: forecast plus a safety margin plus any existing
/// deficit below the minimum threshold.
///
/// The historical mean error doubles as the safety stock — the worse the
/// model has been for this item, the more buffer the suggestion carries.
/// Two-decimal rounding is part of the contract so downstream reports stay
/// comparable.
#[must_use]
pub fn suggested_stock(
    predicted_demand: Decimal,
    mean_error: Decimal,
    current_stock: Decimal,
    min_stock: Decimal,
) -> Decimal {
    let safety_stock = mean_error;
    let shortage = (min_stock - current_stock).max(Decimal::ZERO);

    (predicted_demand + safety_stock + shortage).round_dp(2)
}
