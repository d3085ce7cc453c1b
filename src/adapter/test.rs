use super::*;

use chrono::NaiveDate;

use crate::grid::EditOutcome;
use crate::row::RowKey;

fn clinic() -> Scope {
    Scope::clinic("north").with_month("2025-03")
}

fn line_item(id: &str, patient: &str, charge: f64, ins: f64, status: &str) -> Row {
    Row::new(id)
        .with("patient_name", Value::Text(patient.to_string()))
        .with("units", Value::Number(1.0))
        .with("charge", Value::Currency(charge))
        .with("insurance_paid", Value::Currency(ins))
        .with("patient_paid", Value::Currency(0.0))
        .with("status", Value::Choice(status.to_string()))
}

fn billing_adapter() -> TableAdapter<Billing, MemoryStore> {
    let store = MemoryStore::with_rows(
        &clinic(),
        vec![
            line_item("b1", "Ames", 200.0, 150.0, "Paid"),
            line_item("b2", "Baker", 120.0, 0.0, "Denied"),
        ],
    );
    TableAdapter::new(Billing, store, clinic()).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn billing_schema_is_valid() {
    let adapter = billing_adapter();
    let cols = adapter.columns();
    assert_eq!(cols.len(), 11);
    assert_eq!(cols.get("status").unwrap().option_color("Denied"), Some("#c62828"));
    assert!(cols.get("date_of_service").unwrap().required);
}

#[test]
fn billing_metrics() {
    let adapter = billing_adapter();
    let metrics = adapter.metrics();

    assert_eq!(metrics.line_items, 2);
    assert_eq!(metrics.units, 2.0);
    assert_eq!(metrics.total_charges, 320.0);
    assert_eq!(metrics.total_paid, 150.0);
    assert_eq!(metrics.outstanding, 170.0);
    assert_eq!(metrics.denied, 1);
}

#[test]
fn grid_edits_flow_through_to_store() {
    let mut adapter = billing_adapter();
    let mut grid = adapter.grid(GridConfig::default());
    assert_eq!(grid.title(), Some("Billing"));

    grid.begin_edit(adapter.rows(), RowKey::Real("b2".to_string()), "insurance_paid")
        .unwrap();
    grid.set_edit_text("120");
    grid.commit_edit(&mut adapter);

    assert_eq!(adapter.status(), &LoadStatus::Ready);
    assert_eq!(adapter.metrics().outstanding, 50.0);

    let stored = adapter.store().fetch(&clinic()).unwrap();
    let b2 = stored.iter().find(|r| r.id == "b2").unwrap();
    assert_eq!(b2.get("insurance_paid"), Some(&Value::Currency(120.0)));
}

#[test]
fn placeholder_edit_adds_to_store() {
    let mut adapter = billing_adapter();
    let mut grid = adapter.grid(GridConfig::default());

    grid.begin_edit(adapter.rows(), RowKey::Placeholder(0), "patient_name")
        .unwrap();
    grid.set_edit_text("Chen");
    let Some(EditOutcome::Added { id }) = grid.commit_edit(&mut adapter) else {
        panic!("expected a new row");
    };

    assert_eq!(adapter.rows().len(), 3);
    assert_eq!(adapter.store().len(), 3);
    assert!(adapter.rows().iter().any(|r| r.id == id));
}

#[test]
fn delete_and_import_persist() {
    let mut adapter = billing_adapter();
    let mut grid = adapter.grid(GridConfig::default());

    grid.toggle_selected(&RowKey::Real("b1".to_string()));
    assert_eq!(grid.delete_selected(&mut adapter), 1);
    assert_eq!(adapter.store().len(), 1);

    let header = adapter.columns().ids().collect::<Vec<_>>().join(",");
    let text = format!("{}\n03-02-25,Diaz,Dr. Ruiz,99213,\"25,59\",2,180,0,20,Submitted,\n", header);
    assert_eq!(grid.import(&text, &mut adapter).unwrap(), 1);

    assert_eq!(adapter.store().len(), 2);
    let diaz = adapter.rows().iter().find(|r| r.text("patient_name") == "Diaz").unwrap();
    assert_eq!(diaz.text("modifiers"), "25,59");
    assert_eq!(diaz.text("date_of_service"), "2025-03-02");
}

#[test]
fn store_failure_shows_error_panel() {
    let mut adapter = billing_adapter();
    adapter.store_mut().set_offline(true);

    adapter.delete_row("b1");
    let panel = adapter.error_panel().unwrap();
    assert!(panel.contains("delete"));
    assert!(panel.contains("offline"));

    // the local change stands; nothing is retried
    assert_eq!(adapter.rows().len(), 1);

    adapter.store_mut().set_offline(false);
    adapter.reload();
    assert_eq!(adapter.status(), &LoadStatus::Ready);
    assert_eq!(adapter.rows().len(), 2);
}

#[test]
fn failed_initial_load() {
    let mut store = MemoryStore::new();
    store.set_offline(true);
    let adapter = TableAdapter::new(Billing, store, clinic()).unwrap();

    assert!(adapter.rows().is_empty());
    assert!(matches!(adapter.status(), LoadStatus::Failed(_)));
}

#[test]
fn update_of_missing_row_fails() {
    let mut adapter = billing_adapter();
    adapter.update_row("nope", "notes", Value::Text("x".to_string()));
    assert!(adapter.error_panel().unwrap().contains("nope"));
}

#[test]
fn scope_change_reloads_instead_of_clearing() {
    let march = clinic();
    let april = Scope::clinic("north").with_month("2025-04");

    let mut store = MemoryStore::with_rows(&march, vec![line_item("m1", "Ames", 10.0, 0.0, "Paid")]);
    store.save(&april, &line_item("a1", "Baker", 20.0, 0.0, "Paid")).unwrap();
    store.save(&april, &line_item("a2", "Cole", 30.0, 0.0, "Paid")).unwrap();

    let mut adapter = TableAdapter::new(Billing, store, march.clone()).unwrap();
    assert_eq!(adapter.rows().len(), 1);

    adapter.set_scope(april);
    assert_eq!(adapter.rows().len(), 2);
    assert_eq!(adapter.metrics().total_charges, 50.0);

    adapter.set_scope(march);
    assert_eq!(adapter.rows()[0].id, "m1");
}

#[test]
fn clinic_scope_without_month_sees_every_month() {
    let march = clinic();
    let mut store = MemoryStore::with_rows(&march, vec![line_item("m1", "Ames", 10.0, 0.0, "Paid")]);
    store
        .save(&Scope::clinic("north").with_month("2025-04"), &line_item("a1", "Baker", 20.0, 0.0, "Paid"))
        .unwrap();
    store
        .save(&Scope::clinic("south"), &line_item("s1", "Dunn", 5.0, 0.0, "Paid"))
        .unwrap();

    let adapter = TableAdapter::new(Billing, store, Scope::clinic("north")).unwrap();
    assert_eq!(adapter.rows().len(), 2);
}

#[test]
fn provider_scope_filters_rows() {
    let scope = Scope::clinic("north").with_provider("p1");
    assert!(scope.covers(&Scope::clinic("north").with_provider("p1").with_month("2025-01")));
    assert!(!scope.covers(&Scope::clinic("north").with_provider("p2")));
    assert!(!scope.covers(&Scope::clinic("north")));
}

fn claim(id: &str, billed_on: &str, billed: f64, collected: f64, status: &str) -> Row {
    let billed_col = Column::new("billed_on", "Billed", crate::schema::ColumnKind::DateMmDdYy);
    Row::new(id)
        .with("billed_on", billed_col.coerce(billed_on))
        .with("amount_billed", Value::Currency(billed))
        .with("amount_collected", Value::Currency(collected))
        .with("status", Value::Choice(status.to_string()))
}

#[test]
fn receivables_aging() {
    let domain = Receivables::new(day(2025, 6, 30));
    let rows = vec![
        claim("c1", "2025-06-20", 100.0, 0.0, "Open"),
        claim("c2", "2025-05-15", 200.0, 50.0, "Appealed"),
        claim("c3", "2025-04-15", 300.0, 0.0, "Open"),
        claim("c4", "2025-01-02", 400.0, 0.0, "Open"),
        claim("c5", "2025-01-02", 500.0, 0.0, "Closed"),
        claim("c6", "2025-01-02", 80.0, 80.0, "Open"),
        claim("c7", "sometime", 10.0, 0.0, "Open"),
    ];

    let metrics = domain.metrics(&rows);
    assert_eq!(metrics.open_items, 5);
    assert_eq!(metrics.outstanding, 960.0);
    assert_eq!(
        metrics.aging,
        AgingBuckets {
            current: 110.0,
            days_31_60: 150.0,
            days_61_90: 300.0,
            over_90: 400.0,
        }
    );
}

#[test]
fn receivables_adapter() {
    let scope = Scope::clinic("north");
    let store = MemoryStore::with_rows(&scope, vec![claim("c1", "2025-06-01", 90.0, 10.0, "Open")]);
    let adapter = TableAdapter::new(Receivables::new(day(2025, 6, 30)), store, scope).unwrap();

    assert_eq!(adapter.grid(GridConfig::default()).title(), Some("Accounts Receivable"));
    assert_eq!(adapter.metrics().outstanding, 80.0);
    assert_eq!(adapter.columns().get("service_month").unwrap().kind.date_format(), Some(crate::schema::DateFormat::Month));
}
