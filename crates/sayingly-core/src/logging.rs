//! Structured logging field name constants for the catalog query layer.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue (failed fetch surfaced to the caller) |
//! | INFO  | Lifecycle events, pool startup |
//! | DEBUG | Operation completions, cache decisions |
//! | TRACE | Per-row mapping detail |

/// Subsystem originating the log event. Values: "catalog", "db", "pool".
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name. Examples: "fetch_all", "fetch_by_id",
/// "fetch_related", "select".
pub const OPERATION: &str = "op";

/// Content type being queried (wire name).
pub const CONTENT_TYPE: &str = "content_type";

/// Content item identifier.
pub const CONTENT_ID: &str = "content_id";

/// Language code involved in the operation.
pub const LANGUAGE: &str = "language";

/// Backing table touched by a query.
pub const DB_TABLE: &str = "db_table";

/// Number of rows or items produced.
pub const RESULT_COUNT: &str = "result_count";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Whether a memoized result served the call.
pub const CACHE_HIT: &str = "cache_hit";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
