use crate::row::Row;
use crate::schema::{Column, ColumnKind, ColumnOption};
use crate::value::Value;

use super::{total, Domain};

pub const STATUS_DENIED: &str = "Denied";

/// Billing line items for a clinic
#[derive(Debug, Clone, Copy, Default)]
pub struct Billing;

#[derive(Debug, Clone, PartialEq)]
pub struct BillingMetrics {
    pub line_items: usize,
    pub units: f64,
    pub total_charges: f64,
    pub total_paid: f64,
    /// Charges not yet covered by insurance or patient payments
    pub outstanding: f64,
    pub denied: usize,
}

impl Domain for Billing {
    type Metrics = BillingMetrics;

    fn title(&self) -> &'static str {
        "Billing"
    }

    fn columns(&self) -> Vec<Column> {
        vec![
            Column::new("date_of_service", "DOS", ColumnKind::DateMmDdYy)
                .with_width(8)
                .required(),
            Column::new("patient_name", "Patient", ColumnKind::Text).required(),
            Column::new("provider", "Provider", ColumnKind::Text),
            Column::new("cpt_code", "CPT", ColumnKind::Text).with_width(6).required(),
            Column::new("modifiers", "Modifiers", ColumnKind::MultiSelect).with_options(vec![
                ColumnOption::new("25", "#546e7a"),
                ColumnOption::new("59", "#6d4c41"),
                ColumnOption::new("95", "#00897b"),
                ColumnOption::new("GT", "#3949ab"),
            ]),
            Column::new("units", "Units", ColumnKind::Number).with_width(5),
            Column::new("charge", "Charge", ColumnKind::Currency),
            Column::new("insurance_paid", "Ins Paid", ColumnKind::Currency),
            Column::new("patient_paid", "Pt Paid", ColumnKind::Currency),
            Column::new("status", "Status", ColumnKind::Select).with_options(vec![
                ColumnOption::new("Pending", "#fbc02d"),
                ColumnOption::new("Submitted", "#1e88e5"),
                ColumnOption::new("Paid", "#2e7d32"),
                ColumnOption::new(STATUS_DENIED, "#c62828"),
            ]),
            Column::new("notes", "Notes", ColumnKind::Text),
        ]
    }

    fn metrics(&self, rows: &[Row]) -> BillingMetrics {
        let total_charges = total(rows, "charge");
        let total_paid = total(rows, "insurance_paid") + total(rows, "patient_paid");
        let denied = rows
            .iter()
            .filter(|r| matches!(r.get("status"), Some(Value::Choice(s)) if s == STATUS_DENIED))
            .count();

        BillingMetrics {
            line_items: rows.len(),
            units: total(rows, "units"),
            total_charges,
            total_paid,
            outstanding: total_charges - total_paid,
            denied,
        }
    }
}
