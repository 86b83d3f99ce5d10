//! Constant-time operations to prevent timing attacks

use subtle::ConstantTimeEq;

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise.
/// Slices of different length compare unequal without inspecting contents;
/// lengths are treated as public.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Branch-free absolute value of a signed 32-bit integer.
///
/// Input must be greater than `i32::MIN`.
#[inline(always)]
pub fn ct_abs_i32(a: i32) -> i32 {
    let sign = a >> 31;
    a.wrapping_sub(sign & a.wrapping_mul(2))
}
