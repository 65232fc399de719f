use rust_decimal::Decimal;

/// Outcome of the reorder rule for one item.
///
/// The three fields are always internally consistent:
/// `needs_requisition == (quantity_to_order > 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderDecision {
    pub reorder_point: Decimal,
    pub needs_requisition: bool,
    pub quantity_to_order: Decimal,
}

/// Applies the reorder-point rule.
///
/// The reorder point is the minimum threshold plus the predicted
/// next-period demand; stock exactly at the reorder point does NOT trigger
/// a requisition.
#[must_use]
pub fn evaluate_reorder(
    min_stock: Decimal,
    predicted_demand: Decimal,
    current_stock: Decimal,
) -> ReorderDecision {
    let reorder_point = min_stock + predicted_demand;
    let needs_requisition = current_stock < reorder_point;
    let quantity_to_order = (reorder_point - current_stock).max(Decimal::ZERO);

    ReorderDecision {
        reorder_point,
        needs_requisition,
        quantity_to_order,
    }
}
