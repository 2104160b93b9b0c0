/*!
 * Limits and Constants
 *
 * Centralized location for the fixed values the program relies on.
 * Grouped by concern.
 */

use crate::core::types::Elem;

// =============================================================================
// VALUE RULE
// =============================================================================

/// Base raised to the outer index (first prime)
pub const OUTER_BASE: Elem = 2;

/// Base raised to the middle index (second prime)
pub const MIDDLE_BASE: Elem = 3;

/// Base raised to the inner index (third prime)
pub const INNER_BASE: Elem = 5;

// =============================================================================
// COMMAND LINE
// =============================================================================

/// Number of positional arguments, excluding the program name
pub const ARG_COUNT: usize = 3;

/// Logical names of the positional arguments, in order
pub const ARG_NAMES: [&str; ARG_COUNT] = ["x", "y", "z"];

/// Shown in the usage message when argv[0] is missing or empty
pub const FALLBACK_PROGRAM_NAME: &str = "<program>";

// =============================================================================
// DIAGNOSTIC PREFIXES
// =============================================================================

/// Prefix for allocation failures on stderr
pub const ALLOCATION_CONTEXT: &str = "array allocation";

/// Prefix for write failures on stderr
pub const OUTPUT_CONTEXT: &str = "value output";

// =============================================================================
// TRACING
// =============================================================================

/// Enables JSON log output when set to `1` or `true`
pub const TRACE_JSON_ENV: &str = "ARR3D_TRACE_JSON";

/// Filter used when RUST_LOG is unset
/// stderr carries documented messages only unless logging is requested
pub const DEFAULT_LOG_FILTER: &str = "off";
