/*!
 * Array Printer
 * Writes the allocation count and every element to an output sink
 */

use crate::array::JaggedArray;
use std::io::{self, Write};
use tracing::{debug, error};

/// Write `successfully allocated <n> times`
pub fn print_allocs<W: Write>(out: &mut W, allocations: usize) -> io::Result<()> {
    writeln!(out, "successfully allocated {} times", allocations)
}

/// Write `arr[i][j][k] = value` for every element in outer-major order
///
/// Stops at the first failed write. Lines already written stay written.
/// Returns the number of lines written.
pub fn print_array<W: Write>(out: &mut W, array: &JaggedArray) -> io::Result<usize> {
    let mut lines = 0;
    for (i, plane) in array.planes().iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, value) in row.iter().enumerate() {
                if let Err(e) = writeln!(out, "arr[{}][{}][{}] = {}", i, j, k, value) {
                    error!(error = %e, i, j, k, lines, "Element write failed");
                    return Err(e);
                }
                lines += 1;
            }
        }
    }
    debug!(lines, "Array printed");
    Ok(lines)
}
