// Copyright (c) 2022-2023 The MobileCoin Foundation

use zeroize::Zeroize;

use crate::engine::Driver;

/// [Driver] implementation deriving keys from a BIP39 seed,
/// used for simulation and testing
pub struct SeedDriver {
    seed: [u8; 64],
}

impl SeedDriver {
    /// Create a new driver from a 64-byte BIP39 seed
    pub fn new(seed: &[u8; 64]) -> Self {
        Self { seed: *seed }
    }
}

impl Driver for SeedDriver {
    fn slip10_derive_ed25519(&self, path: &[u32]) -> [u8; 32] {
        slip10_ed25519::derive_ed25519_private_key(&self.seed, path)
    }
}

impl Drop for SeedDriver {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl core::fmt::Debug for SeedDriver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeedDriver").finish_non_exhaustive()
    }
}
