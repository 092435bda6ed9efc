mod support;

use domain::{DatastoreInstance, DeviceInfo};
use spare_combo::{ComboError, validate};
use support::*;

#[test]
fn valid_pair_yields_combo_name() {
    let pair = validate(&directory(), OPERATIONAL, SPARE, "production").expect("valid");
    assert_eq!(pair.instance, DatastoreInstance::Production);
    assert_eq!(pair.name.to_string(), COMBO);
}

#[test]
fn same_device_is_identity_conflict() {
    let err = validate(&directory(), OPERATIONAL, OPERATIONAL, "dev").expect_err("same");
    assert!(matches!(err, ComboError::IdentityConflict(_)));
}

#[test]
fn different_classes_are_rejected() {
    let err = validate(&directory(), OPERATIONAL, OTHER_CLASS, "dev").expect_err("class");
    match err {
        ComboError::ClassMismatch {
            operational_class,
            spare_class,
            ..
        } => {
            assert_eq!(operational_class, 63);
            assert_eq!(spare_class, 64);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn different_gateways_are_rejected() {
    let err = validate(&directory(), OPERATIONAL, OTHER_GATEWAY, "dev").expect_err("gateway");
    assert!(matches!(err, ComboError::GatewayMismatch { .. }));
}

#[test]
fn unknown_datastore_is_checked_last() {
    let err = validate(&directory(), OPERATIONAL, SPARE, "staging").expect_err("datastore");
    assert!(matches!(err, ComboError::UnknownDatastore(_)));
    // 类别错误优先于实例错误
    let err = validate(&directory(), OPERATIONAL, OTHER_CLASS, "staging").expect_err("class");
    assert!(matches!(err, ComboError::ClassMismatch { .. }));
}

#[test]
fn unknown_device_is_not_found() {
    let err = validate(&directory(), OPERATIONAL, "RFNA.999.01.ETH1", "dev").expect_err("unknown");
    assert!(matches!(err, ComboError::DeviceNotFound(name) if name == "RFNA.999.01.ETH1"));
}

#[tokio::test]
async fn class_mismatch_never_touches_the_datastore() {
    let fixture = fixture();
    fixture
        .store
        .set_fault(Some(spare_storage::FaultPoint::InsertSystemProperties));
    let before = fixture.db();
    let err = fixture
        .lifecycle
        .create(OPERATIONAL, OTHER_CLASS, "dev")
        .await
        .expect_err("class");
    assert!(matches!(err, ComboError::ClassMismatch { .. }));
    let after = fixture.db();
    assert_eq!(
        before.properties_of(OPERATIONAL),
        after.properties_of(OPERATIONAL)
    );
    assert!(after.system_by_name("RFMAG.866.19.ETH1_07").is_none());
}

#[test]
fn operational_name_with_separator_is_rejected() {
    let directory = directory()
        .with_device(DeviceInfo::new("RFMAG_866.ETH1", 63, "CFC-866-RETH1", 21));
    let err = validate(&directory, "RFMAG_866.ETH1", SPARE, "dev").expect_err("unencodable");
    assert!(matches!(err, ComboError::InvalidComboName(_)));
}

#[tokio::test]
async fn unencodable_pair_is_never_written() {
    let mut db = database();
    let operational = db.add_system("RFMAG_866.ETH1", 7, 63);
    db.set_property(operational, domain::SPARE_ID_PROPERTY, "07");
    let fixture = fixture_with_directory(
        db,
        directory().with_device(DeviceInfo::new("RFMAG_866.ETH1", 63, "CFC-866-RETH1", 21)),
    );
    let err = fixture
        .lifecycle
        .create("RFMAG_866.ETH1", SPARE, "dev")
        .await
        .expect_err("unencodable");
    assert!(matches!(err, ComboError::InvalidComboName(_)));
    let db = fixture.db();
    assert!(db.system_by_name("RFMAG_866.ETH1_04").is_none());
    assert_eq!(
        db.properties_of("RFMAG_866.ETH1")[domain::SPARE_ID_PROPERTY].value.as_deref(),
        Some("07")
    );
}
