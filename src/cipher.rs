//! Password-derived XOR keystream.
//!
//! This is obfuscation, not cryptography: the keystream comes from a 32-bit
//! FNV-1a seed fed through a linear congruential generator. Nothing in the
//! codec depends on it.

pub trait StreamCipher {
    /// XOR the keystream over `data` in place.
    fn apply(&self, data: &mut [u8]);

    fn encrypt(&self, data: &mut [u8]) {
        self.apply(data);
    }

    fn decrypt(&self, data: &mut [u8]) {
        self.apply(data);
    }
}

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(FNV_OFFSET, |hash, &b| (hash ^ b as u32).wrapping_mul(FNV_PRIME))
}

#[derive(Debug, Clone)]
pub struct XorKeystream {
    seed: u32,
}

impl XorKeystream {
    pub fn new(password: &str) -> Self {
        XorKeystream {
            seed: fnv1a(password.as_bytes()),
        }
    }

    pub fn keystream(&self) -> impl Iterator<Item = u8> {
        let mut state = self.seed;
        std::iter::repeat_with(move || {
            state = state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
            (state >> 24) as u8
        })
    }
}

impl StreamCipher for XorKeystream {
    fn apply(&self, data: &mut [u8]) {
        data.iter_mut()
            .zip(self.keystream())
            .for_each(|(byte, key)| *byte ^= key);
    }
}
