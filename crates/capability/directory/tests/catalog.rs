use spare_directory::{JsonPropertyCatalog, PropertyCatalog};

#[test]
fn catalog_reads_spare_flag() {
    let catalog = JsonPropertyCatalog::from_json(
        r#"{
            "DEVICE.SPARE_ID": {},
            "REF.DEFAULTS.I.ACCELERATION": { "from_spare_converter": true, "type": "FLOAT" },
            "LIMITS.I.POS": { "from_spare_converter": false }
        }"#,
    )
    .expect("catalog");

    assert!(!catalog.lookup("DEVICE.SPARE_ID").expect("spare id").from_spare_converter);
    assert!(
        catalog
            .lookup("REF.DEFAULTS.I.ACCELERATION")
            .expect("acceleration")
            .from_spare_converter
    );
    assert!(!catalog.lookup("LIMITS.I.POS").expect("limits").from_spare_converter);
    assert!(catalog.lookup("CAL.A.ADC.INTERNAL.GAIN").is_none());
}

#[test]
fn catalog_rejects_invalid_json() {
    assert!(JsonPropertyCatalog::from_json("[1, 2]").is_err());
}
