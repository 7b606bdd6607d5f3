//! Per-birth deterministic RNG streams.
//!
//! Every probabilistic decision in trait assignment draws from a stream
//! owned by the single invocation, never from a process-wide generator:
//! concurrent births stay independent and a fixed seed reproduces the
//! outcome exactly. Streams are domain-separated so adding draws to one
//! concern cannot shift another's sequence.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Seeded RNG streams for one birth event.
#[derive(Debug)]
pub struct BirthRngBundle {
    penalty: RefCell<ChaCha20Rng>,
    legacy: RefCell<ChaCha20Rng>,
}

impl BirthRngBundle {
    /// Construct the bundle from the birth event's seed.
    #[must_use]
    pub fn from_birth_seed(seed: u64) -> Self {
        let penalty = ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"penalty"));
        let legacy = ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"legacy"));
        Self {
            penalty: RefCell::new(penalty),
            legacy: RefCell::new(legacy),
        }
    }

    /// Access the inbreeding-penalty RNG stream.
    #[must_use]
    pub fn penalty(&self) -> RefMut<'_, ChaCha20Rng> {
        self.penalty.borrow_mut()
    }

    /// Access the legacy-talent RNG stream.
    #[must_use]
    pub fn legacy(&self) -> RefMut<'_, ChaCha20Rng> {
        self.legacy.borrow_mut()
    }
}

fn derive_stream_seed(birth_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&birth_seed.to_le_bytes())
        .expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
