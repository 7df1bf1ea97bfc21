//! Slot storage - the only persistent state the model touches
//!
//! A store maps an opaque 32-byte key to a 32-byte word. Key derivation is
//! the caller's business; the model only needs a key to round-trip its word.
//! Unwritten keys read as the zero word.

use std::collections::HashMap;

use primitive_types::U256;

use crate::error::Result;
use crate::fixed::{FixedPoint, Packed};
use crate::precision::{Precision, Signedness};

/// 32-byte storage word
pub type Slot = [u8; 32];

pub const ZERO_SLOT: Slot = [0u8; 32];

/// Opaque storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey([u8; 32]);

impl SlotKey {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<u64> for SlotKey {
    fn from(index: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&index.to_be_bytes());
        Self(bytes)
    }
}

/// Key-addressed word store
pub trait SlotStore {
    fn read(&self, key: &SlotKey) -> Slot;
    fn write(&mut self, key: &SlotKey, slot: Slot);
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<SlotKey, Slot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys ever written
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, key: &SlotKey) -> Slot {
        self.slots.get(key).copied().unwrap_or(ZERO_SLOT)
    }

    fn write(&mut self, key: &SlotKey, slot: Slot) {
        self.slots.insert(*key, slot);
    }
}

fn u256_to_be_bytes(word: U256) -> Slot {
    let U256(limbs) = word;
    let mut bytes = ZERO_SLOT;
    for (i, limb) in limbs.iter().enumerate() {
        let start = (3 - i) * 8;
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

fn u256_from_be_bytes(bytes: &Slot) -> U256 {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = (3 - i) * 8;
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(chunk);
    }
    U256(limbs)
}

/// Two's complement negation in 256 bits
fn twos_complement(word: U256) -> U256 {
    (!word).overflowing_add(U256::one()).0
}

/// Sign/magnitude as a 256-bit two's complement word
pub(crate) fn encode_word(negative: bool, magnitude: U256) -> Slot {
    if negative {
        u256_to_be_bytes(twos_complement(magnitude))
    } else {
        u256_to_be_bytes(magnitude)
    }
}

/// Inverse of `encode_word`; unsigned words are never negative
pub(crate) fn decode_word(slot: &Slot, signed: bool) -> (bool, U256) {
    let word = u256_from_be_bytes(slot);
    if signed && word.bit(255) {
        (true, twos_complement(word))
    } else {
        (false, word)
    }
}

/// Two packed halves in one slot, `high` first
pub(crate) fn join_halves(high: [u8; 16], low: [u8; 16]) -> Slot {
    let mut slot = ZERO_SLOT;
    slot[..16].copy_from_slice(&high);
    slot[16..].copy_from_slice(&low);
    slot
}

pub(crate) fn split_halves(slot: &Slot) -> ([u8; 16], [u8; 16]) {
    let mut high = [0u8; 16];
    let mut low = [0u8; 16];
    high.copy_from_slice(&slot[..16]);
    low.copy_from_slice(&slot[16..]);
    (high, low)
}

impl<P: Precision, S: Signedness> FixedPoint<P, S> {
    /// Read a full-width value; a signed word below `MIN` fails with Underflow
    pub fn read<T: SlotStore + ?Sized>(store: &T, key: &SlotKey) -> Result<Self> {
        let (negative, magnitude) = decode_word(&store.read(key), S::SIGNED);
        Self::from_parts(negative, magnitude)
    }

    pub fn store<T: SlotStore + ?Sized>(self, store: &mut T, key: &SlotKey) {
        store.write(key, encode_word(self.is_negative(), self.raw_magnitude()));
    }
}

impl<P: Precision, S: Signedness> Packed<P, S> {
    /// Read a packed value from the low 16 bytes of a slot
    pub fn read<T: SlotStore + ?Sized>(store: &T, key: &SlotKey) -> Self {
        let (_, low) = split_halves(&store.read(key));
        Self::from_be_bytes(low)
    }

    pub fn store<T: SlotStore + ?Sized>(self, store: &mut T, key: &SlotKey) {
        store.write(key, join_halves([0u8; 16], self.to_be_bytes()));
    }
}
