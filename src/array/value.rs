/*!
 * Element Values
 * Coordinate-derived values using integer exponentiation
 */

use crate::core::limits::{INNER_BASE, MIDDLE_BASE, OUTER_BASE};
use crate::core::types::Elem;

/// `base` to the `exp`-th power by repeated squaring, wrapping on overflow
pub fn elem_pow(mut base: Elem, mut exp: usize) -> Elem {
    let mut result: Elem = 1;
    loop {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        exp >>= 1;
        if exp == 0 {
            break;
        }
        base = base.wrapping_mul(base);
    }
    result
}

/// Value stored at `(i, j, k)`: `2^i * 3^j * 5^k`
#[inline]
pub fn value_at(i: usize, j: usize, k: usize) -> Elem {
    elem_pow(OUTER_BASE, i)
        .wrapping_mul(elem_pow(MIDDLE_BASE, j))
        .wrapping_mul(elem_pow(INNER_BASE, k))
}
