/*!
 * Output Module
 * Text rendering of the array to standard output
 */

pub mod printer;

pub use printer::{print_allocs, print_array};
