use domain::DatastoreInstance;

#[test]
fn datastore_instance_parses_short_and_long_names() {
    assert_eq!(DatastoreInstance::parse("PRO").expect("pro"), DatastoreInstance::Production);
    assert_eq!(
        DatastoreInstance::parse("production").expect("production"),
        DatastoreInstance::Production
    );
    assert_eq!(DatastoreInstance::parse("Dev").expect("dev"), DatastoreInstance::Development);
    assert_eq!(DatastoreInstance::Development.to_string(), "dev");
}

#[test]
fn datastore_instance_rejects_unknown_names() {
    let err = DatastoreInstance::parse("test").expect_err("unknown");
    assert_eq!(err.name, "test");
    assert!(err.to_string().contains("pro, dev"));
}
