//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Cache hits, misses and in-flight joins.
    pub log_cache: bool,

    /// Tickets issued and stale results discarded.
    pub log_selection: bool,

    /// Row counts at each pipeline stage.
    pub log_pipeline: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Points dropped or reordered while sanitizing provider data.
    pub log_sanitize: bool,
}

pub const DF: LogFlags = LogFlags {
    log_cache: true,
    log_selection: true,

    log_pipeline: false,
    log_performance: false,
    log_sanitize: false,
};
