//! 备件管理领域模型：设备、系统属性、组合系统命名与数据库实例。

pub mod combo_name;
pub mod datastore;
pub mod device;
pub mod property;

pub use combo_name::{ComboName, ComboNameError};
pub use datastore::{DatastoreInstance, UnknownDatastore};
pub use device::DeviceInfo;
pub use property::{Property, PropertySet, SPARE_ID_PROPERTY, SPARE_ID_RESET};
