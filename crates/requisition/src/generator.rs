use replenish_core::{PredictionResult, RequisitionOrder};
use rust_decimal::prelude::ToPrimitive;

/// Derives the requisition order list from a batch of prediction results.
///
/// Keeps only items flagged as needing reposition, in batch order.
/// Quantities are ceiling-rounded to whole units — fractional units are not
/// orderable, and rounding down could leave an item below its reorder
/// point. An empty batch or a batch with nothing to reorder yields an empty
/// list, not an error.
#[must_use]
pub fn generate_requisition_orders(results: &[PredictionResult]) -> Vec<RequisitionOrder> {
    let orders: Vec<RequisitionOrder> = results
        .iter()
        .filter(|r| r.needs_requisition)
        .filter_map(|r| {
            let quantity = r.quantity_to_order.ceil().to_u64()?;
            Some(RequisitionOrder {
                code: r.code.clone(),
                item: r.item.clone(),
                current_stock: r.current_stock,
                min_stock: r.min_stock,
                quantity,
            })
        })
        .collect();

    tracing::debug!(
        candidates = results.len(),
        orders = orders.len(),
        "requisition orders generated"
    );

    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use replenish_core::Confidence;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn result(item: &str, needs: bool, quantity: Decimal) -> PredictionResult {
        PredictionResult {
            code: format!("C-{item}"),
            item: item.to_string(),
            predicted_demand: 30.0,
            demand_min: 20.0,
            demand_max: 40.0,
            historical_error: 10.0,
            confidence: Confidence::Medium,
            current_stock: dec!(40),
            min_stock: dec!(50),
            suggested_stock: dec!(60),
            reorder_point: dec!(80),
            needs_requisition: needs,
            quantity_to_order: quantity,
        }
    }

    #[test]
    fn keeps_only_items_needing_reposition() {
        let results = vec![
            result("GUANTE", true, dec!(40)),
            result("GASA", false, dec!(0)),
            result("VENDA", true, dec!(12)),
        ];
        let orders = generate_requisition_orders(&results);

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].item, "GUANTE");
        assert_eq!(orders[1].item, "VENDA");
    }

    #[test]
    fn quantities_are_ceiling_rounded() {
        let results = vec![result("GUANTE", true, dec!(11.01))];
        let orders = generate_requisition_orders(&results);
        assert_eq!(orders[0].quantity, 12);
    }

    #[test]
    fn whole_quantities_stay_unchanged() {
        let results = vec![result("GUANTE", true, dec!(40))];
        let orders = generate_requisition_orders(&results);
        assert_eq!(orders[0].quantity, 40);
    }

    #[test]
    fn every_order_has_positive_quantity() {
        let results = vec![
            result("GUANTE", true, dec!(0.2)),
            result("VENDA", true, dec!(3.7)),
        ];
        for order in generate_requisition_orders(&results) {
            assert!(order.quantity >= 1);
        }
    }

    #[test]
    fn empty_when_nothing_needs_reposition() {
        let results = vec![result("GUANTE", false, dec!(0))];
        assert!(generate_requisition_orders(&results).is_empty());
    }

    #[test]
    fn output_is_subset_of_input() {
        let results = vec![
            result("A", true, dec!(5)),
            result("B", false, dec!(0)),
            result("C", true, dec!(1.5)),
        ];
        let orders = generate_requisition_orders(&results);
        assert!(orders.len() <= results.len());
        for order in &orders {
            let source = results.iter().find(|r| r.item == order.item).unwrap();
            assert!(source.needs_requisition);
        }
    }
}
