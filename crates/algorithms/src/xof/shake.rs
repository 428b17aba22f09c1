//! SHAKE extendable output functions (FIPS 202)
//!
//! Thin stateful wrappers over the `sha3` crate that follow the
//! [`ExtendableOutputFunction`] contract: absorb with `update`, then squeeze
//! any number of times. Updating after the first squeeze is an error.

use sha3::digest::{ExtendableOutput, Update, XofReader};

use super::ExtendableOutputFunction;
use crate::error::{Error, Result};

macro_rules! shake_xof {
    ($name:ident, $hasher:ty, $reader:ty, $level:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone)]
        pub struct $name {
            hasher: Option<$hasher>,
            reader: Option<$reader>,
        }

        impl $name {
            fn reader(&mut self) -> &mut $reader {
                if let Some(hasher) = self.hasher.take() {
                    self.reader = Some(hasher.finalize_xof());
                }
                self.reader.get_or_insert_with(|| <$hasher>::default().finalize_xof())
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("squeezing", &self.reader.is_some())
                    .finish()
            }
        }

        impl ExtendableOutputFunction for $name {
            fn new() -> Self {
                Self {
                    hasher: Some(<$hasher>::default()),
                    reader: None,
                }
            }

            fn update(&mut self, data: &[u8]) -> Result<()> {
                match self.hasher.as_mut() {
                    Some(hasher) => {
                        hasher.update(data);
                        Ok(())
                    }
                    None => Err(Error::xof_finalized()),
                }
            }

            fn finalize(&mut self) -> Result<()> {
                self.reader();
                Ok(())
            }

            fn squeeze(&mut self, output: &mut [u8]) -> Result<()> {
                self.reader().read(output);
                Ok(())
            }

            fn reset(&mut self) -> Result<()> {
                *self = Self::new();
                Ok(())
            }

            fn security_level() -> usize {
                $level
            }
        }
    };
}

shake_xof!(
    ShakeXof128,
    sha3::Shake128,
    sha3::Shake128Reader,
    128,
    "SHAKE128, used to expand the public matrix"
);
shake_xof!(
    ShakeXof256,
    sha3::Shake256,
    sha3::Shake256Reader,
    256,
    "SHAKE256, used for hashing, secret sampling, masking and challenges"
);
