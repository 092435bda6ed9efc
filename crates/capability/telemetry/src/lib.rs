//! 追踪初始化、操作 ID 与生命周期计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 生命周期计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub combos_created: u64,
    pub combos_deleted: u64,
    pub activations: u64,
    pub deactivations: u64,
    pub properties_skipped: u64,
    pub persistence_failures: u64,
}

/// 生命周期计数器。
pub struct TelemetryMetrics {
    combos_created: AtomicU64,
    combos_deleted: AtomicU64,
    activations: AtomicU64,
    deactivations: AtomicU64,
    properties_skipped: AtomicU64,
    persistence_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            combos_created: AtomicU64::new(0),
            combos_deleted: AtomicU64::new(0),
            activations: AtomicU64::new(0),
            deactivations: AtomicU64::new(0),
            properties_skipped: AtomicU64::new(0),
            persistence_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            combos_created: self.combos_created.load(Ordering::Relaxed),
            combos_deleted: self.combos_deleted.load(Ordering::Relaxed),
            activations: self.activations.load(Ordering::Relaxed),
            deactivations: self.deactivations.load(Ordering::Relaxed),
            properties_skipped: self.properties_skipped.load(Ordering::Relaxed),
            persistence_failures: self.persistence_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// 生成新的 operation_id（每次生命周期操作一个）。
pub fn new_operation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录组合系统创建次数。
pub fn record_combo_created() {
    metrics().combos_created.fetch_add(1, Ordering::Relaxed);
}

/// 记录组合系统删除次数。
pub fn record_combo_deleted() {
    metrics().combos_deleted.fetch_add(1, Ordering::Relaxed);
}

/// 记录激活次数。
pub fn record_activation() {
    metrics().activations.fetch_add(1, Ordering::Relaxed);
}

/// 记录去激活次数。
pub fn record_deactivation() {
    metrics().deactivations.fetch_add(1, Ordering::Relaxed);
}

/// 记录因属性分类表缺失而跳过的属性数。
pub fn record_properties_skipped(count: u64) {
    metrics()
        .properties_skipped
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录持久化失败（事务回滚）次数。
pub fn record_persistence_failure() {
    metrics()
        .persistence_failures
        .fetch_add(1, Ordering::Relaxed);
}
