use domain::{DatastoreInstance, DeviceInfo, SPARE_ID_PROPERTY};
use spare_combo::{ComboDirectory, ComboLifecycle, DatastoreAccess};
use spare_credentials::StaticSecretStore;
use spare_directory::{JsonPropertyCatalog, NameFileDirectory};
use spare_manager::{ComboError, delete_combo};
use spare_storage::{InMemoryDatabase, InMemorySpareStore};
use std::sync::Arc;

const OPERATIONAL: &str = "RFMAG.866.19.ETH1";
const SPARE: &str = "RFNA.866.04.ETH1";
const COMBO: &str = "RFMAG.866.19.ETH1_04";

fn store() -> Arc<InMemorySpareStore> {
    let mut db = InMemoryDatabase::new();
    let operational = db.add_system(OPERATIONAL, 7, 63);
    let spare = db.add_system(SPARE, 7, 63);
    db.set_property(operational, SPARE_ID_PROPERTY, "0");
    db.set_property(spare, SPARE_ID_PROPERTY, "0");
    db.add_component(spare, 500);
    Arc::new(InMemorySpareStore::new().with_database(DatastoreInstance::Development, db))
}

fn services(
    store: &Arc<InMemorySpareStore>,
    directory: NameFileDirectory,
) -> (ComboLifecycle, ComboDirectory) {
    let secrets = StaticSecretStore::new().with_secret(
        DatastoreInstance::Development,
        "POCONTROLS_MOD",
        "secret",
    );
    let access = DatastoreAccess::new(store.clone(), Arc::new(secrets), "POCONTROLS_MOD");
    let directory = Arc::new(directory);
    let catalog = JsonPropertyCatalog::new().with_property(SPARE_ID_PROPERTY, false);
    (
        ComboLifecycle::new(directory.clone(), Arc::new(catalog), access.clone()),
        ComboDirectory::new(directory, access),
    )
}

fn full_directory() -> NameFileDirectory {
    NameFileDirectory::new()
        .with_device(DeviceInfo::new(OPERATIONAL, 63, "CFC-866-RETH1", 19))
        .with_device(DeviceInfo::new(SPARE, 63, "CFC-866-RETH1", 4))
}

#[tokio::test]
async fn deletes_through_current_device_data() {
    let store = store();
    let (lifecycle, combos) = services(&store, full_directory());
    lifecycle.create(OPERATIONAL, SPARE, "dev").await.expect("create");

    let deleted = delete_combo(&lifecycle, &combos, COMBO, "dev")
        .await
        .expect("delete");
    assert_eq!(deleted.name.to_string(), COMBO);
    let db = store.snapshot(DatastoreInstance::Development).expect("db");
    assert!(db.system_by_name(COMBO).is_none());
}

#[tokio::test]
async fn falls_back_to_name_when_operational_left_the_name_file() {
    let store = store();
    let (lifecycle, _) = services(&store, full_directory());
    lifecycle.create(OPERATIONAL, SPARE, "dev").await.expect("create");

    let (lifecycle, combos) = services(&store, NameFileDirectory::new());
    let deleted = delete_combo(&lifecycle, &combos, COMBO, "dev")
        .await
        .expect("delete");
    assert_eq!(deleted.components, 1);
    let db = store.snapshot(DatastoreInstance::Development).expect("db");
    assert!(db.system_by_name(COMBO).is_none());
}

#[tokio::test]
async fn malformed_name_is_still_rejected() {
    let store = store();
    let (lifecycle, combos) = services(&store, full_directory());
    let err = delete_combo(&lifecycle, &combos, OPERATIONAL, "dev")
        .await
        .expect_err("malformed");
    assert!(matches!(err, ComboError::InvalidComboName(_)));
}
