/*!
 * Argument Parsing
 * Validates the three positional extents
 */

use crate::core::limits::{ARG_COUNT, ARG_NAMES, FALLBACK_PROGRAM_NAME};
use crate::core::types::Dimensions;
use std::ffi::{OsStr, OsString};
use std::num::IntErrorKind;
use thiserror::Error;

/// A rejected extent argument, named by its logical name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("argument {name} must be positive")]
    Negative { name: &'static str },

    #[error("failed to parse argument {name}")]
    Invalid { name: &'static str },

    #[error("argument {name} is too large")]
    TooLarge { name: &'static str },
}

impl ArgError {
    pub fn name(&self) -> &'static str {
        match self {
            ArgError::Negative { name }
            | ArgError::Invalid { name }
            | ArgError::TooLarge { name } => name,
        }
    }
}

/// Whitespace as C's `isspace` sees it, vertical tab included
#[inline]
fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Parse one base-10 extent
///
/// Leading whitespace and a single `+` are accepted. A leading `-` is
/// rejected even for `-0`. Anything after the digits is an error.
pub fn parse_extent(arg: &OsStr, name: &'static str) -> Result<usize, ArgError> {
    let text = arg.to_str().ok_or(ArgError::Invalid { name })?;
    let trimmed = text.trim_start_matches(is_c_space);

    if trimmed.starts_with('-') {
        return Err(ArgError::Negative { name });
    }

    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ArgError::Invalid { name });
    }

    digits.parse::<usize>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ArgError::TooLarge { name },
        _ => ArgError::Invalid { name },
    })
}

/// Parse `x`, `y`, `z` in order, reporting the first bad one
pub fn parse_dimensions<S: AsRef<OsStr>>(extents: &[S; ARG_COUNT]) -> Result<Dimensions, ArgError> {
    let [x, y, z] = extents;
    Ok(Dimensions::new(
        parse_extent(x.as_ref(), ARG_NAMES[0])?,
        parse_extent(y.as_ref(), ARG_NAMES[1])?,
        parse_extent(z.as_ref(), ARG_NAMES[2])?,
    ))
}

/// Name shown in the usage message
pub fn program_name(argv0: Option<&OsString>) -> String {
    match argv0 {
        Some(name) if !name.is_empty() => name.to_string_lossy().into_owned(),
        _ => FALLBACK_PROGRAM_NAME.to_string(),
    }
}
