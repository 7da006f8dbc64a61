//! Zobrist fingerprint of the alive-cell set.
//!
//! Each interior cell owns two random keys, one for "absent" and one for
//! "present". Toggling a cell XORs both in, so the fingerprint of a board is
//! the XOR of `absent ^ present` over its alive cells: independent of the
//! order in which cells were destroyed, and restored exactly by toggling the
//! same cell again.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{Coord, Position};

/// Seed used by [`crate::Board::new`] for its key table.
pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Opaque 64-bit fingerprint of a board's alive cells.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    #[inline]
    pub fn to_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Immutable key table, one `[absent, present]` pair per interior cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZobristKeys {
    size: Coord,
    keys: Vec<[u64; 2]>,
}

impl ZobristKeys {
    const ABSENT: usize = 0;
    const PRESENT: usize = 1;

    /// Draw `size²` key pairs from a seeded generator.
    pub fn new(size: Coord, seed: u64) -> ZobristKeys {
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = size as usize * size as usize;
        let keys: Vec<[u64; 2]> = (0..cells).map(|_| [rng.random(), rng.random()]).collect();
        ZobristKeys { size, keys }
    }

    #[inline]
    pub fn size(&self) -> Coord {
        self.size
    }

    #[inline]
    fn pair(&self, p: Position) -> &[u64; 2] {
        debug_assert!(p.is_interior(self.size));
        &self.keys[p.row as usize * self.size as usize + p.col as usize]
    }

    /// Key XORed in while `p` is absent.
    #[inline]
    pub fn absent(&self, p: Position) -> u64 {
        self.pair(p)[Self::ABSENT]
    }

    /// Key XORed in while `p` is present.
    #[inline]
    pub fn present(&self, p: Position) -> u64 {
        self.pair(p)[Self::PRESENT]
    }

    /// Flip `p` between absent and present. Self-inverse.
    #[inline]
    pub fn toggle(&self, fingerprint: &mut Fingerprint, p: Position) {
        let pair = self.pair(p);
        fingerprint.0 ^= pair[Self::ABSENT] ^ pair[Self::PRESENT];
    }

    /// Fingerprint of a board with exactly `alive` cells present.
    pub fn fingerprint_of<I>(&self, alive: I) -> Fingerprint
    where
        I: IntoIterator<Item = Position>,
    {
        let mut fingerprint = Fingerprint::default();
        for p in alive {
            self.toggle(&mut fingerprint, p);
        }
        fingerprint
    }
}
