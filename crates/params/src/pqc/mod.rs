//! Constants for post-quantum signature algorithms

pub mod dilithium;
