//! Engine configuration

use crate::cache::CacheConfig;

/// Operational knobs for the assignment engine
///
/// Scoring weights and zone multipliers are deliberately NOT configurable
/// here; they live as constants next to the scoring code because they are a
/// tuned surface that changes with the scoring formula, not per deployment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Soft latency target for a single strategy pass (warning, not abort)
    pub strategy_latency_target_ms: u64,
    /// Soft latency target for a whole allocation call
    pub allocation_latency_target_ms: u64,
    /// Zone utilization the balanced strategy steers toward
    pub target_zone_utilization: f64,
    /// Average revenue per cover used for projections (EUR)
    pub revenue_per_cover: f64,
    /// Timeout for one historical-pattern lookup
    pub pattern_timeout_ms: u64,
    /// Early-termination: best score considered confident
    pub scan_confidence_threshold: f64,
    /// Early-termination: candidates to hold a confident best before stopping
    pub scan_confident_candidates: u32,
    /// Early-termination: hard cap on candidates scanned
    pub scan_max_iterations: u32,
    /// Bounded memo cache capacity for scored candidate lists
    pub memo_capacity: usize,
    /// Result cache TTLs and operation timeout
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy_latency_target_ms: 150,
            allocation_latency_target_ms: 200,
            target_zone_utilization: 0.75,
            revenue_per_cover: 45.0,
            pattern_timeout_ms: 400,
            scan_confidence_threshold: 0.95,
            scan_confident_candidates: 3,
            scan_max_iterations: 20,
            memo_capacity: 1000,
            cache: CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Build a config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            strategy_latency_target_ms: env_parse(
                "STRATEGY_LATENCY_TARGET_MS",
                defaults.strategy_latency_target_ms,
            ),
            allocation_latency_target_ms: env_parse(
                "ALLOCATION_LATENCY_TARGET_MS",
                defaults.allocation_latency_target_ms,
            ),
            target_zone_utilization: env_parse(
                "TARGET_ZONE_UTILIZATION",
                defaults.target_zone_utilization,
            ),
            revenue_per_cover: env_parse("REVENUE_PER_COVER", defaults.revenue_per_cover),
            pattern_timeout_ms: env_parse("PATTERN_TIMEOUT_MS", defaults.pattern_timeout_ms),
            scan_confidence_threshold: defaults.scan_confidence_threshold,
            scan_confident_candidates: defaults.scan_confident_candidates,
            scan_max_iterations: env_parse("SCAN_MAX_ITERATIONS", defaults.scan_max_iterations),
            memo_capacity: env_parse("MEMO_CAPACITY", defaults.memo_capacity),
            cache: CacheConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
