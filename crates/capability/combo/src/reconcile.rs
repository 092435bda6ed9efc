//! 属性合并。
//!
//! 组合系统的属性来自运行设备与备件两侧：属性目录中标记为
//! `from_spare_converter` 的取备件值，其余取运行设备值。

use crate::error::ComboError;
use domain::{Property, PropertySet};
use spare_directory::PropertyCatalog;
use spare_storage::SpareTransaction;
use std::collections::BTreeSet;
use tracing::warn;

/// 合并结果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// 属性名 -> 合并后的属性（带属性 ID）。
    pub merged: PropertySet,
    /// 属性目录中缺失、被跳过的属性名（升序）。
    pub skipped: Vec<String>,
}

impl Reconciliation {
    pub fn properties(&self) -> Vec<Property> {
        self.merged.values().cloned().collect()
    }
}

/// 合并两侧已读取的属性集合。
///
/// 两侧属性名集合必须一致，否则返回 `PropertySetMismatch`（携带对称差）。
/// 属性目录中没有的属性仅记录告警并跳过。
pub fn reconcile(
    operational: &PropertySet,
    spare: &PropertySet,
    catalog: &dyn PropertyCatalog,
) -> Result<Reconciliation, ComboError> {
    let difference: BTreeSet<String> = operational
        .keys()
        .filter(|name| !spare.contains_key(*name))
        .chain(spare.keys().filter(|name| !operational.contains_key(*name)))
        .cloned()
        .collect();
    if !difference.is_empty() {
        return Err(ComboError::PropertySetMismatch { difference });
    }

    let mut result = Reconciliation::default();
    for (name, operational_property) in operational {
        let Some(class) = catalog.lookup(name) else {
            warn!(target: "spare.combo", property = %name, "property_not_in_catalog");
            result.skipped.push(name.clone());
            continue;
        };
        let source = match spare.get(name) {
            Some(spare_property) if class.from_spare_converter => spare_property,
            _ => operational_property,
        };
        result.merged.insert(name.clone(), source.clone());
    }
    Ok(result)
}

/// 在事务内读取两侧属性并合并。
pub async fn fetch_and_reconcile(
    tx: &mut dyn SpareTransaction,
    catalog: &dyn PropertyCatalog,
    operational: &str,
    spare: &str,
) -> Result<Reconciliation, ComboError> {
    let operational_properties = tx.system_properties(operational).await?;
    let spare_properties = tx.system_properties(spare).await?;
    reconcile(&operational_properties, &spare_properties, catalog).inspect_err(|err| {
        if let ComboError::PropertySetMismatch { difference } = err {
            warn!(
                target: "spare.combo",
                operational = %operational,
                spare = %spare,
                mismatched = difference.len(),
                "property_set_mismatch"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spare_directory::JsonPropertyCatalog;

    fn set(entries: &[(i64, &str, &str)]) -> PropertySet {
        entries
            .iter()
            .map(|(id, name, value)| (name.to_string(), Property::new(*id, *name, *value)))
            .collect()
    }

    fn catalog() -> JsonPropertyCatalog {
        JsonPropertyCatalog::new()
            .with_property("REF.DEFAULTS.I.ACCELERATION", true)
            .with_property("LIMITS.I.POS", false)
            .with_property("DEVICE.SPARE_ID", false)
    }

    #[test]
    fn spare_sourced_properties_take_spare_value_and_id() {
        let operational = set(&[
            (11, "REF.DEFAULTS.I.ACCELERATION", "1.5"),
            (12, "LIMITS.I.POS", "100"),
        ]);
        let spare = set(&[
            (21, "REF.DEFAULTS.I.ACCELERATION", "2.5"),
            (22, "LIMITS.I.POS", "90"),
        ]);
        let result = reconcile(&operational, &spare, &catalog()).expect("reconcile");
        let acceleration = &result.merged["REF.DEFAULTS.I.ACCELERATION"];
        assert_eq!(acceleration.value.as_deref(), Some("2.5"));
        assert_eq!(acceleration.id, 21);
        let limit = &result.merged["LIMITS.I.POS"];
        assert_eq!(limit.value.as_deref(), Some("100"));
        assert_eq!(limit.id, 12);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn mismatch_carries_symmetric_difference() {
        let operational = set(&[(1, "A", "x"), (2, "B", "x")]);
        let spare = set(&[(1, "A", "y"), (3, "C", "y")]);
        let err = reconcile(&operational, &spare, &catalog()).expect_err("mismatch");
        match err {
            ComboError::PropertySetMismatch { difference } => {
                let names: Vec<&str> = difference.iter().map(String::as_str).collect();
                assert_eq!(names, vec!["B", "C"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn uncataloged_property_is_skipped() {
        let operational = set(&[(12, "LIMITS.I.POS", "100"), (30, "DEVICE.UNLISTED", "a")]);
        let spare = set(&[(22, "LIMITS.I.POS", "90"), (31, "DEVICE.UNLISTED", "b")]);
        let result = reconcile(&operational, &spare, &catalog()).expect("reconcile");
        assert_eq!(result.skipped, vec!["DEVICE.UNLISTED".to_string()]);
        assert_eq!(result.merged.len(), 1);
        assert_eq!(result.properties().len(), 1);
    }

    #[test]
    fn null_values_stay_null() {
        let mut operational = set(&[(21, "REF.DEFAULTS.I.ACCELERATION", "1.5")]);
        operational.insert(
            "LIMITS.I.POS".to_string(),
            Property::with_value(12, "LIMITS.I.POS", None),
        );
        let mut spare = set(&[(22, "LIMITS.I.POS", "")]);
        spare.insert(
            "REF.DEFAULTS.I.ACCELERATION".to_string(),
            Property::with_value(21, "REF.DEFAULTS.I.ACCELERATION", None),
        );
        let result = reconcile(&operational, &spare, &catalog()).expect("reconcile");
        assert_eq!(result.merged["LIMITS.I.POS"].value, None);
        assert_eq!(result.merged["REF.DEFAULTS.I.ACCELERATION"].value, None);
    }

    #[test]
    fn empty_sets_merge_to_empty() {
        let result =
            reconcile(&PropertySet::new(), &PropertySet::new(), &catalog()).expect("reconcile");
        assert!(result.merged.is_empty());
    }
}
