//! Seed authority: the single source of randomness for a simulation run.
//!
//! A base seed drives one ChaCha20 master generator. Session seeds are drawn
//! from it in session-id order before any work is partitioned, which is what
//! makes results independent of how many workers later run them. Every
//! consumer builds its own generator from its seed via [`create_generator`];
//! nothing here touches process-wide random state.
//!
//! ```
//! use ridesim_engine::seed::SeedAuthority;
//!
//! let mut a = SeedAuthority::new(42).unwrap();
//! let mut b = SeedAuthority::new(42).unwrap();
//! assert_eq!(
//!     a.derive_session_seeds(100).unwrap(),
//!     b.derive_session_seeds(100).unwrap()
//! );
//! ```

use std::collections::{BTreeMap, HashSet};

use rand::rngs::OsRng;
use rand::{Rng, SeedableRng, TryRngCore};
use rand_chacha::ChaCha20Rng;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::errors::SeedError;

/// Seeds are kept to 31 bits so they survive any platform's signed integer
/// handling unchanged.
pub type Seed = u32;

/// Index of a session within one run, `0..N`.
pub type SessionId = usize;

/// Generator handed to a table session.
pub type SessionRng = ChaCha20Rng;

pub const MAX_SEED: Seed = 0x7FFF_FFFF;

/// Upper bound on sessions per derivation call.
///
/// A call holds every seed twice (duplicate filter plus the ordered map),
/// roughly 80 bytes per session, so this bound caps it near 800 MB. The
/// executor then keeps one result per session on top of that.
pub const MAX_SESSIONS: usize = 10_000_000;

/// Upper bound on worker ids accepted by [`derive_worker_seed`].
pub const MAX_WORKER_ID: usize = 1_024;

const WORKER_SEED_MULTIPLIER: u64 = 1_000_003;
const STATE_VERSION: u64 = 1;
// rand_chacha only honours the low 68 bits of the word position
const WORD_POS_LIMIT: u128 = 1 << 68;

pub fn validate_seed(seed: u64) -> Result<Seed, SeedError> {
    if seed > u64::from(MAX_SEED) {
        return Err(SeedError::SeedOutOfRange {
            seed,
            max: MAX_SEED,
        });
    }
    Ok(seed as Seed)
}

/// Fresh, independent generator for `seed`.
pub fn create_generator(seed: Seed) -> SessionRng {
    ChaCha20Rng::seed_from_u64(u64::from(seed))
}

/// Seed for worker-local randomness that is not tied to any session.
///
/// Pure: `(base_seed * 1_000_003 + worker_id) mod (MAX_SEED + 1)`.
pub fn derive_worker_seed(base_seed: Seed, worker_id: usize) -> Result<Seed, SeedError> {
    validate_seed(u64::from(base_seed))?;
    if worker_id > MAX_WORKER_ID {
        return Err(SeedError::InvalidWorkerId {
            requested: worker_id,
            max: MAX_WORKER_ID,
        });
    }
    let modulus = u64::from(MAX_SEED) + 1;
    let mixed = (u64::from(base_seed) * WORKER_SEED_MULTIPLIER + worker_id as u64) % modulus;
    Ok(mixed as Seed)
}

/// A seed from the operating system's entropy source.
pub fn secure_seed() -> Result<Seed, SeedError> {
    let raw = OsRng
        .try_next_u32()
        .map_err(|e| SeedError::Entropy(e.to_string()))?;
    Ok(raw & MAX_SEED)
}

#[derive(Debug, Clone)]
pub struct SeedAuthority {
    base_seed: Seed,
    master: ChaCha20Rng,
    sessions_derived: u64,
}

impl SeedAuthority {
    pub fn new(base_seed: Seed) -> Result<Self, SeedError> {
        validate_seed(u64::from(base_seed))?;
        Ok(Self {
            base_seed,
            master: create_generator(base_seed),
            sessions_derived: 0,
        })
    }

    /// Authority with a base seed drawn from OS entropy. The chosen seed is
    /// recorded, so the run can still be reproduced afterwards.
    pub fn from_entropy() -> Result<Self, SeedError> {
        Self::new(secure_seed()?)
    }

    pub fn base_seed(&self) -> Seed {
        self.base_seed
    }

    pub fn sessions_derived(&self) -> u64 {
        self.sessions_derived
    }

    /// Draw `count` distinct session seeds keyed `0..count`.
    ///
    /// A draw that repeats an earlier seed of the same call is discarded and
    /// the next draw is used instead; the skip is itself deterministic.
    pub fn derive_session_seeds(
        &mut self,
        count: usize,
    ) -> Result<BTreeMap<SessionId, Seed>, SeedError> {
        if count == 0 || count > MAX_SESSIONS {
            return Err(SeedError::InvalidSessionCount {
                requested: count,
                max: MAX_SESSIONS,
            });
        }
        let mut seen = HashSet::with_capacity(count);
        let mut seeds = BTreeMap::new();
        let mut skipped = 0usize;
        while seeds.len() < count {
            let seed = self.master.random_range(0..=MAX_SEED);
            if seen.insert(seed) {
                seeds.insert(seeds.len(), seed);
            } else {
                skipped += 1;
            }
        }
        self.sessions_derived += count as u64;
        debug!(
            base_seed = self.base_seed,
            count, skipped, "derived session seeds"
        );
        Ok(seeds)
    }

    /// Snapshot of the authority for checkpointing.
    ///
    /// The record is opaque to callers; feed it back through
    /// [`SeedAuthority::import_state`] or [`SeedAuthority::from_state`].
    pub fn export_state(&self) -> Value {
        json!({
            "version": STATE_VERSION,
            "base_seed": self.base_seed,
            "sessions_derived": self.sessions_derived,
            "generator": {
                "key": encode_hex(&self.master.get_seed()),
                "stream": self.master.get_stream(),
                "word_pos": self.master.get_word_pos().to_string(),
            },
        })
    }

    pub fn from_state(state: &Value) -> Result<Self, SeedError> {
        let root = as_object(state, "<root>")?;

        let version = u64_field(root, "version")?;
        if version != STATE_VERSION {
            return Err(SeedError::OutOfRange {
                field: "version",
                detail: format!("unsupported version {version}, expected {STATE_VERSION}"),
            });
        }
        let base_seed = u64_field(root, "base_seed")?;
        let base_seed = validate_seed(base_seed).map_err(|_| SeedError::OutOfRange {
            field: "base_seed",
            detail: format!("{base_seed} exceeds {MAX_SEED}"),
        })?;
        let sessions_derived = u64_field(root, "sessions_derived")?;

        let generator = as_object(field(root, "generator")?, "generator")?;
        let key = str_field(generator, "key", "generator.key")?;
        let key = decode_key(key)?;
        let stream = u64_field_named(generator, "stream", "generator.stream")?;
        let word_pos = str_field(generator, "word_pos", "generator.word_pos")?;
        let word_pos: u128 = word_pos.parse().map_err(|_| SeedError::InvalidType {
            field: "generator.word_pos",
            expected: "a decimal integer string",
        })?;
        if word_pos >= WORD_POS_LIMIT {
            return Err(SeedError::OutOfRange {
                field: "generator.word_pos",
                detail: format!("{word_pos} is not below 2^68"),
            });
        }

        let mut master = create_generator(base_seed);
        if master.get_seed() != key {
            return Err(SeedError::Inconsistent("generator.key"));
        }
        master.set_stream(stream);
        master.set_word_pos(word_pos);

        Ok(Self {
            base_seed,
            master,
            sessions_derived,
        })
    }

    /// Replace this authority's state with a checkpoint. On error the current
    /// state is left untouched.
    pub fn import_state(&mut self, state: &Value) -> Result<(), SeedError> {
        *self = Self::from_state(state)?;
        Ok(())
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, SeedError> {
    obj.get(name).ok_or(SeedError::MissingField(name))
}

fn as_object<'a>(
    value: &'a Value,
    name: &'static str,
) -> Result<&'a Map<String, Value>, SeedError> {
    value.as_object().ok_or(SeedError::InvalidType {
        field: name,
        expected: "an object",
    })
}

fn u64_field(obj: &Map<String, Value>, name: &'static str) -> Result<u64, SeedError> {
    u64_field_named(obj, name, name)
}

fn u64_field_named(
    obj: &Map<String, Value>,
    key: &'static str,
    name: &'static str,
) -> Result<u64, SeedError> {
    let value = obj.get(key).ok_or(SeedError::MissingField(name))?;
    value.as_u64().ok_or(SeedError::InvalidType {
        field: name,
        expected: "a non-negative integer",
    })
}

fn str_field<'a>(
    obj: &'a Map<String, Value>,
    key: &'static str,
    name: &'static str,
) -> Result<&'a str, SeedError> {
    let value = obj.get(key).ok_or(SeedError::MissingField(name))?;
    value.as_str().ok_or(SeedError::InvalidType {
        field: name,
        expected: "a string",
    })
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_key(hex: &str) -> Result<[u8; 32], SeedError> {
    let invalid = || SeedError::InvalidType {
        field: "generator.key",
        expected: "64 hex characters",
    };
    if hex.len() != 64 || !hex.is_ascii() {
        return Err(invalid());
    }
    let mut key = [0u8; 32];
    for (i, byte) in key.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
    }
    Ok(key)
}
