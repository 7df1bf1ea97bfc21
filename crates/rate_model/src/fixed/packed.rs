//! 128-bit packed form for persistence

use core::marker::PhantomData;

use super::FixedPoint;
use crate::error::Result;
use crate::precision::{Precision, Signed, Signedness, Unsigned, P18, P6};

/// Scaled integer truncated to 128 bits (`i128` signed, `u128` unsigned)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Packed<P: Precision, S: Signedness> {
    word: S::Word,
    marker: PhantomData<P>,
}

pub type PackedFixed6 = Packed<P6, Signed>;
pub type PackedUFixed6 = Packed<P6, Unsigned>;
pub type PackedFixed18 = Packed<P18, Signed>;
pub type PackedUFixed18 = Packed<P18, Unsigned>;

impl<P: Precision, S: Signedness> FixedPoint<P, S> {
    /// Fails with Overflow/Underflow outside the 128-bit range
    pub fn pack(self) -> Result<Packed<P, S>> {
        Ok(Packed::from_word(S::pack(self.negative, self.magnitude)?))
    }
}

impl<P: Precision, S: Signedness> Packed<P, S> {
    pub fn from_word(word: S::Word) -> Self {
        Self {
            word,
            marker: PhantomData,
        }
    }

    pub fn word(self) -> S::Word {
        self.word
    }

    /// Sign/zero extension back to 256 bits
    pub fn unpack(self) -> FixedPoint<P, S> {
        let (negative, magnitude) = S::unpack(self.word);
        FixedPoint::canonical(negative, magnitude)
    }

    pub fn to_be_bytes(self) -> [u8; 16] {
        S::word_to_be_bytes(self.word)
    }

    pub fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self::from_word(S::word_from_be_bytes(bytes))
    }
}
