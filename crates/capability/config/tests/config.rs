use domain::DatastoreInstance;
use spare_config::{AppConfig, DEFAULT_DB_ACCOUNT};

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("SPARE_DEV_DATABASE_URL", "postgres://localhost:5432/fgc");
        std::env::remove_var("SPARE_PRO_DATABASE_URL");
        std::env::remove_var("SPARE_DB_ACCOUNT");
        std::env::set_var("SPARE_NAME_FILE", "/tmp/name");
        std::env::set_var("SPARE_PROPERTY_CATALOG", "/tmp/properties.json");
        std::env::set_var("SPARE_OPERATIONAL_CLASS", "62");
        std::env::set_var("SPARE_PROPERTY_MANAGER_URL", "https://pm.example/fgc/");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(
        config.database_urls.get(&DatastoreInstance::Development).map(String::as_str),
        Some("postgres://localhost:5432/fgc")
    );
    assert!(!config.database_urls.contains_key(&DatastoreInstance::Production));
    assert_eq!(config.db_account, DEFAULT_DB_ACCOUNT);
    assert_eq!(config.operational_class, 62);
    assert_eq!(
        config.system_link(42).as_deref(),
        Some("https://pm.example/fgc/details/system?id=42")
    );
}
