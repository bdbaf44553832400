//! Seed derivation for the GSS sequence-number context.
//!
//! The seed is the encryption of a single all-zero block under the session
//! key with its bytes reversed. The reversed copy of the key only ever lives
//! inside [`ReversedKey`], which wipes it when dropped.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes256, Block};
use zeroize::Zeroize;

pub const SEED_LENGTH: usize = 16;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SeedError {
    #[error("unsupported key length: {0} bytes")]
    UnsupportedKeyLength(usize),
}

struct ReversedKey(Vec<u8>);

impl ReversedKey {
    fn new(key: &[u8]) -> Self {
        Self(key.iter().rev().copied().collect())
    }

    fn encrypt_block(&self, block: &mut Block) -> Result<(), SeedError> {
        match self.0.len() {
            16 => {
                let cipher = Aes128::new_from_slice(&self.0)
                    .map_err(|_| SeedError::UnsupportedKeyLength(self.0.len()))?;
                cipher.encrypt_block(block);
            }
            32 => {
                let cipher = Aes256::new_from_slice(&self.0)
                    .map_err(|_| SeedError::UnsupportedKeyLength(self.0.len()))?;
                cipher.encrypt_block(block);
            }
            other => return Err(SeedError::UnsupportedKeyLength(other)),
        }
        Ok(())
    }
}

impl Drop for ReversedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

pub fn make_seed(key: &[u8]) -> Result<[u8; SEED_LENGTH], SeedError> {
    let reversed = ReversedKey::new(key);
    let mut block = Block::default();
    reversed.encrypt_block(&mut block)?;

    let mut seed = [0u8; SEED_LENGTH];
    seed.copy_from_slice(&block);
    block.as_mut_slice().zeroize();
    Ok(seed)
}
