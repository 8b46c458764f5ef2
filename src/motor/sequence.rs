//! Coil phase patterns.

/// Number of phases in one full step cycle.
pub const SEQUENCE_LEN: usize = 8;

/// Levels of the four coil outputs for one phase, bit `i` = coil `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseVector(u8);

impl PhaseVector {
    /// Build from per-coil levels.
    pub const fn new(coils: [bool; 4]) -> Self {
        Self(
            (coils[0] as u8)
                | ((coils[1] as u8) << 1)
                | ((coils[2] as u8) << 2)
                | ((coils[3] as u8) << 3),
        )
    }

    /// Level of one coil.
    #[inline]
    pub const fn coil(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    /// Raw 4-bit pattern.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Ordered phases making up one full step cycle.
pub type Sequence = [PhaseVector; SEQUENCE_LEN];

/// Half-step sequence for a four-phase unipolar motor (28BYJ-48 and the like):
/// single and paired coils alternate, one coil change per phase.
pub const HALF_STEP: Sequence = [
    PhaseVector::new([true, false, false, true]),
    PhaseVector::new([true, false, false, false]),
    PhaseVector::new([true, true, false, false]),
    PhaseVector::new([false, true, false, false]),
    PhaseVector::new([false, true, true, false]),
    PhaseVector::new([false, false, true, false]),
    PhaseVector::new([false, false, true, true]),
    PhaseVector::new([false, false, false, true]),
];
