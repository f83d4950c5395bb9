use sha2::{Digest, Sha256};

/// SHA-256 digest of a string, read as a 256-bit big-endian unsigned integer.
///
/// Used instead of a seeded PRNG so that selections depend only on the
/// archetype id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableHash([u8; 32]);

impl StableHash {
    pub fn of(value: &str) -> Self {
        Self(Sha256::digest(value.as_bytes()).into())
    }

    /// `self mod modulus`. A zero modulus yields zero.
    pub fn modulo(&self, modulus: u64) -> u64 {
        if modulus == 0 {
            return 0;
        }
        let modulus = u128::from(modulus);
        let rem = self
            .0
            .iter()
            .fold(0u128, |rem, &byte| ((rem << 8) | u128::from(byte)) % modulus);
        rem as u64
    }

    /// Index into a slice of `len` items.
    pub fn index(&self, len: usize) -> usize {
        self.modulo(len as u64) as usize
    }

    /// Floor division by a small divisor. A zero divisor returns the hash unchanged.
    pub fn div(&self, divisor: u8) -> Self {
        if divisor == 0 {
            return *self;
        }
        let divisor = u16::from(divisor);
        let mut quotient = [0u8; 32];
        let mut rem = 0u16;
        for (slot, &byte) in quotient.iter_mut().zip(self.0.iter()) {
            let current = (rem << 8) | u16::from(byte);
            *slot = (current / divisor) as u8;
            rem = current % divisor;
        }
        Self(quotient)
    }

    pub fn is_even(&self) -> bool {
        self.0[31] % 2 == 0
    }
}
