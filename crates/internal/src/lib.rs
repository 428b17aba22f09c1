//! Internal utilities shared by the latsig crates
//!
//! Nothing in here is part of the stable public API. The helpers exist so that
//! the arithmetic and signature crates can express branch-free logic in one place.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod constant_time;
