use domain::{ComboName, DeviceInfo};

#[test]
fn combo_name_pads_channel_to_two_digits() {
    let operational = DeviceInfo::new("RFMAG.866.19.ETH1", 63, "CFC-866-RETH1", 19);
    let spare = DeviceInfo::new("RFNA.866.04.ETH1", 63, "CFC-866-RETH1", 4);

    let name = ComboName::for_pair(&operational, &spare).expect("name");
    assert_eq!(name.to_string(), "RFMAG.866.19.ETH1_04");
    assert_eq!(name.spare_id(), "04");
}

#[test]
fn combo_name_keeps_wide_channels() {
    let name = ComboName::new("RPAGM.866.04.ETH8", 27).expect("name");
    assert_eq!(name.to_string(), "RPAGM.866.04.ETH8_27");
}

#[test]
fn combo_name_parses_operational_and_channel() {
    let name = ComboName::parse("RFMAG.866.19.ETH1_04").expect("parse");
    assert_eq!(name.operational(), "RFMAG.866.19.ETH1");
    assert_eq!(name.channel(), 4);
    assert_eq!(name.to_string(), "RFMAG.866.19.ETH1_04");
}

#[test]
fn combo_name_rejects_malformed_names() {
    for raw in [
        "RFMAG.866.19.ETH1",
        "RFMAG_866_04",
        "RFMAG.866.19.ETH1_",
        "_04",
        "RFMAG.866.19.ETH1_x4",
        "RFMAG.866.19.ETH1_999",
        "",
    ] {
        let err = ComboName::parse(raw).expect_err(raw);
        assert_eq!(err.name, raw);
    }
}

#[test]
fn combo_name_rejects_operational_names_that_cannot_be_parsed_back() {
    for operational in ["RFMAG_866.ETH1", ""] {
        let err = ComboName::new(operational, 4).expect_err("unencodable");
        assert_eq!(err.name, format!("{operational}_04"));
    }
}

#[test]
fn every_encoded_name_parses_back() {
    let name = ComboName::new("RFMAG.866.19.ETH1", 7).expect("name");
    let parsed = ComboName::parse(&name.to_string()).expect("parse");
    assert_eq!(parsed, name);
}
