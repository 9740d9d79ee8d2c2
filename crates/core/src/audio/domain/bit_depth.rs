/// Sample encoding of a PCM stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitDepth {
    Int8,
    Int16,
    Int24,
    Int32,
    Float32,
}

impl BitDepth {
    /// Maps a bits-per-sample / float flag pair to a supported depth.
    pub fn from_bits(bits: u16, is_float: bool) -> Option<Self> {
        match (bits, is_float) {
            (8, false) => Some(BitDepth::Int8),
            (16, false) => Some(BitDepth::Int16),
            (24, false) => Some(BitDepth::Int24),
            (32, false) => Some(BitDepth::Int32),
            (32, true) => Some(BitDepth::Float32),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Int8 => 8,
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Int32 | BitDepth::Float32 => 32,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        self.bits() as usize / 8
    }

    pub fn is_float(self) -> bool {
        self == BitDepth::Float32
    }

    /// Divisor that maps integer samples onto [-1.0, 1.0).
    ///
    /// Always a power of two, so the conversion is exact in f64.
    pub fn full_scale(self) -> f64 {
        match self {
            BitDepth::Float32 => 1.0,
            depth => (1u64 << (depth.bits() - 1)) as f64,
        }
    }
}
