//! RngSeed — доменный seed для покерного RNG.
//!
//! Турнир хранит базовый seed (u64 или [u8;32]) и перед каждой раздачей
//! делает детерминированное hash-reseeding:
//!     hand_seed = H(domain || base_seed || round_number)
//!
//! Так любая отдельная раздача воспроизводится по seed турнира и номеру
//! раунда, не прокручивая все предыдущие.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Создать seed из 32 байт.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (конфиг турнира и тесты).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение для конкретной раздачи.
    pub fn derive_for_hand(&self, round_number: u32) -> Self {
        let mut hasher = Sha256::new();

        // Доменный префикс
        hasher.update(b"POKER_ARENA_RNG_V1");

        // Базовый seed
        hasher.update(self.bytes);

        // Номер раздачи
        hasher.update(round_number.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    /// Создать DeterministicRng из seed.
    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_bytes(self.bytes)
    }
}
