//! Purchase summary
//!
//! Approved requisitions grouped into purchase-order lines by item,
//! specification and unit.

use crate::domain::{ApprovalStatus, Requisition};
use serde::Serialize;
use std::collections::HashMap;

/// One purchase-order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub item_name: String,
    pub spec: String,
    pub unit: String,
    /// Sum of quantities; non-numeric quantities count as 0
    pub total_quantity: i64,
    pub business_keys: Vec<String>,
    pub departments: Vec<String>,
    pub needed_dates: Vec<String>,
}

/// Every line plus the number of approved records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseSummary {
    /// Lines in first-seen order
    pub lines: Vec<SummaryLine>,
    /// Approved records considered
    pub total_orders: usize,
}

fn parse_quantity(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn push_present(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        list.push(value.to_string());
    }
}

/// Group approved records into purchase-order lines
pub fn summarize(records: &[Requisition]) -> PurchaseSummary {
    let mut lines: Vec<SummaryLine> = Vec::new();
    let mut positions: HashMap<(String, String, String), usize> = HashMap::new();
    let mut total_orders = 0;

    for record in records
        .iter()
        .filter(|r| r.approval_status == ApprovalStatus::Approved)
    {
        total_orders += 1;
        let group = (
            record.item_name.trim().to_string(),
            record.spec.trim().to_string(),
            record.unit.trim().to_string(),
        );

        let index = *positions.entry(group.clone()).or_insert_with(|| {
            lines.push(SummaryLine {
                item_name: group.0,
                spec: group.1,
                unit: group.2,
                total_quantity: 0,
                business_keys: Vec::new(),
                departments: Vec::new(),
                needed_dates: Vec::new(),
            });
            lines.len() - 1
        });

        let line = &mut lines[index];
        let quantity = parse_quantity(&record.quantity);
        match line.total_quantity.checked_add(quantity) {
            Some(total) => line.total_quantity = total,
            None => {
                tracing::warn!(
                    business_key = record.key_str(),
                    item = %line.item_name,
                    "Quantity total out of range, clamping"
                );
                line.total_quantity = line.total_quantity.saturating_add(quantity);
            }
        }
        push_present(&mut line.business_keys, record.key_str());
        push_present(&mut line.departments, &record.department);
        push_present(&mut line.needed_dates, &record.needed_date);
    }

    tracing::debug!(lines = lines.len(), total_orders, "Purchase summary built");
    PurchaseSummary {
        lines,
        total_orders,
    }
}
