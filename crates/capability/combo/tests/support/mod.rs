#![allow(dead_code)]

use domain::{DatastoreInstance, DeviceInfo, SPARE_ID_PROPERTY};
use spare_combo::{ComboDirectory, ComboLifecycle, DatastoreAccess};
use spare_credentials::StaticSecretStore;
use spare_directory::{JsonPropertyCatalog, NameFileDirectory};
use spare_storage::{InMemoryDatabase, InMemorySpareStore};
use std::sync::Arc;

pub const OPERATIONAL: &str = "RFMAG.866.19.ETH1";
pub const SPARE: &str = "RFNA.866.04.ETH1";
pub const OTHER_CLASS: &str = "RPZES.866.07.ETH1";
pub const OTHER_GATEWAY: &str = "RPAGM.866.04.ETH8";
pub const COMBO: &str = "RFMAG.866.19.ETH1_04";

pub const ACCELERATION: &str = "REF.DEFAULTS.I.ACCELERATION";
pub const LIMIT: &str = "LIMITS.I.POS";

pub struct Fixture {
    pub store: Arc<InMemorySpareStore>,
    pub lifecycle: ComboLifecycle,
    pub combos: ComboDirectory,
}

impl Fixture {
    pub fn db(&self) -> InMemoryDatabase {
        self.store
            .snapshot(DatastoreInstance::Development)
            .expect("dev database")
    }
}

pub fn directory() -> NameFileDirectory {
    NameFileDirectory::new()
        .with_device(DeviceInfo::new(OPERATIONAL, 63, "CFC-866-RETH1", 19))
        .with_device(DeviceInfo::new(SPARE, 63, "CFC-866-RETH1", 4))
        .with_device(DeviceInfo::new(OTHER_CLASS, 64, "CFC-866-RETH1", 7))
        .with_device(DeviceInfo::new(OTHER_GATEWAY, 63, "CFC-866-RETH8", 4))
}

pub fn catalog() -> JsonPropertyCatalog {
    JsonPropertyCatalog::new()
        .with_property(SPARE_ID_PROPERTY, false)
        .with_property(ACCELERATION, true)
        .with_property(LIMIT, false)
}

/// 运行设备 SPARE_ID 初始为 "07"，备件带两个组件关联。
pub fn database() -> InMemoryDatabase {
    let mut db = InMemoryDatabase::new();
    let operational = db.add_system(OPERATIONAL, 7, 63);
    let spare = db.add_system(SPARE, 7, 63);
    let other = db.add_system(OTHER_CLASS, 8, 64);
    db.set_property(operational, SPARE_ID_PROPERTY, "07");
    db.set_property(operational, ACCELERATION, "1.5");
    db.set_property(operational, LIMIT, "100");
    db.set_property(spare, SPARE_ID_PROPERTY, "0");
    db.set_property(spare, ACCELERATION, "2.5");
    db.set_property(spare, LIMIT, "90");
    db.set_property(other, SPARE_ID_PROPERTY, "0");
    db.add_component(operational, 400);
    db.add_component(spare, 500);
    db.add_component(spare, 501);
    db
}

pub fn fixture() -> Fixture {
    fixture_with(database())
}

pub fn fixture_with(db: InMemoryDatabase) -> Fixture {
    fixture_with_directory(db, directory())
}

pub fn fixture_with_directory(db: InMemoryDatabase, directory: NameFileDirectory) -> Fixture {
    let store = Arc::new(
        InMemorySpareStore::new().with_database(DatastoreInstance::Development, db),
    );
    let secrets = StaticSecretStore::new().with_secret(
        DatastoreInstance::Development,
        "POCONTROLS_MOD",
        "secret",
    );
    let access = DatastoreAccess::new(store.clone(), Arc::new(secrets), "POCONTROLS_MOD");
    let directory = Arc::new(directory);
    Fixture {
        lifecycle: ComboLifecycle::new(directory.clone(), Arc::new(catalog()), access.clone()),
        combos: ComboDirectory::new(directory, access),
        store,
    }
}
