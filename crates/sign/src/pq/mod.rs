//! Post-quantum signature schemes

pub mod dilithium;
