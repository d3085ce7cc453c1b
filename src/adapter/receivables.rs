use chrono::NaiveDate;

use crate::row::Row;
use crate::schema::{Column, ColumnKind, ColumnOption};
use crate::value::Value;

use super::Domain;

pub const STATUS_CLOSED: &str = "Closed";

/// Outstanding claims, aged against `as_of`
#[derive(Debug, Clone, Copy)]
pub struct Receivables {
    pub as_of: NaiveDate,
}

impl Receivables {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }
}

/// Open balance by days since billing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgingBuckets {
    pub current: f64,
    pub days_31_60: f64,
    pub days_61_90: f64,
    pub over_90: f64,
}

impl AgingBuckets {
    fn add(&mut self, age_days: i64, amount: f64) {
        match age_days {
            i64::MIN..=30 => self.current += amount,
            31..=60 => self.days_31_60 += amount,
            61..=90 => self.days_61_90 += amount,
            _ => self.over_90 += amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceivablesMetrics {
    pub open_items: usize,
    pub outstanding: f64,
    pub aging: AgingBuckets,
}

fn amount(row: &Row, column: &str) -> f64 {
    row.get(column).and_then(Value::as_number).unwrap_or(0.0)
}

impl Domain for Receivables {
    type Metrics = ReceivablesMetrics;

    fn title(&self) -> &'static str {
        "Accounts Receivable"
    }

    fn columns(&self) -> Vec<Column> {
        vec![
            Column::new("patient_name", "Patient", ColumnKind::Text).required(),
            Column::new("payer", "Payer", ColumnKind::Select).with_options(vec![
                ColumnOption::new("Medicare", "#1565c0"),
                ColumnOption::new("Medicaid", "#2e7d32"),
                ColumnOption::new("Commercial", "#6a1b9a"),
                ColumnOption::new("Self Pay", "#ef6c00"),
            ]),
            Column::new("billed_on", "Billed", ColumnKind::DateMmDdYy).required(),
            Column::new("service_month", "Month", ColumnKind::DateMonth).with_width(5),
            Column::new("amount_billed", "Billed Amt", ColumnKind::Currency),
            Column::new("amount_collected", "Collected", ColumnKind::Currency),
            Column::new("follow_up", "Follow Up", ColumnKind::DateMmDd),
            Column::new("status", "Status", ColumnKind::Select).with_options(vec![
                ColumnOption::new("Open", "#fbc02d"),
                ColumnOption::new("Appealed", "#8e24aa"),
                ColumnOption::new(STATUS_CLOSED, "#757575"),
            ]),
        ]
    }

    /// Rows with a positive balance that aren't closed count as open.
    /// Rows without a readable billing date land in the current bucket.
    fn metrics(&self, rows: &[Row]) -> ReceivablesMetrics {
        let mut metrics = ReceivablesMetrics::default();

        for row in rows {
            let closed = matches!(row.get("status"), Some(Value::Choice(s)) if s == STATUS_CLOSED);
            let balance = amount(row, "amount_billed") - amount(row, "amount_collected");
            if closed || balance <= 0.0 {
                continue;
            }

            let age = row
                .get("billed_on")
                .and_then(Value::as_date)
                .map(|billed| (self.as_of - billed).num_days())
                .unwrap_or(0);

            metrics.open_items += 1;
            metrics.outstanding += balance;
            metrics.aging.add(age, balance);
        }

        metrics
    }
}
