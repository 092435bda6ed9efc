use spare_telemetry::{metrics, new_operation_id, record_combo_created, record_properties_skipped};

#[test]
fn operation_ids_are_unique() {
    let first = new_operation_id();
    let second = new_operation_id();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_combo_created();
    record_properties_skipped(3);
    let after = metrics().snapshot();
    assert!(after.combos_created >= before.combos_created + 1);
    assert!(after.properties_skipped >= before.properties_skipped + 3);
}
