//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise.
/// Slice lengths are treated as public; only the contents are compared in
/// constant time.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    ct_eq_choice(a, b).into()
}

/// Constant-time equality check that returns a Choice (0 or 1)
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Constant-time selection
///
/// Returns `a` if `condition` is false, `b` if `condition` is true.
pub fn ct_select<T>(a: T, b: T, condition: bool) -> T
where
    T: ConditionallySelectable,
{
    let choice = Choice::from(condition as u8);
    T::conditional_select(&a, &b, choice)
}

/// Constant-time mask generation for a boolean condition
///
/// Returns an all-1s mask if condition is true, all-0s if false
#[inline(always)]
pub fn ct_mask_u32(condition: bool) -> u32 {
    0u32.wrapping_sub(condition as u32)
}

/// All-ones if `a < b`, zero otherwise.
///
/// Both operands must be below 2^31.
#[inline(always)]
pub fn ct_lt_mask_u32(a: u32, b: u32) -> u32 {
    (a.wrapping_sub(b) >> 31).wrapping_neg()
}

/// Branch-free selection between two words under a full-width mask.
///
/// Returns `a` when `mask` is zero and `b` when `mask` is all-ones.
#[inline(always)]
pub fn ct_select_u32(a: u32, b: u32, mask: u32) -> u32 {
    a ^ (mask & (a ^ b))
}

/// Branch-free absolute value of a signed word.
#[inline(always)]
pub fn ct_abs_i32(x: i32) -> u32 {
    let mask = x >> 31;
    ((x ^ mask).wrapping_sub(mask)) as u32
}
