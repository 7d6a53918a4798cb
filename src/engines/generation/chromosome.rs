use serde::{Deserialize, Serialize};

/// Candidate solution: `k` via points as interleaved quantized coordinates
/// `[x0, y0, x1, y1, ...]`.
///
/// Working on fixed-width integer codes keeps crossover a slice swap and
/// mutation a single bit flip; the [`Encoding`] maps codes to workspace units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<u16>,
}

impl Chromosome {
    pub fn new(genes: Vec<u16>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[u16] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [u16] {
        &mut self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn via_point_count(&self) -> usize {
        self.genes.len() / 2
    }
}

/// Affine map between `bit_width`-bit codes and `[-bound, bound]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoding {
    bit_width: u32,
    bound: f64,
}

impl Encoding {
    pub fn new(bit_width: u32, bound: f64) -> Self {
        Self { bit_width, bound }
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn max_code(&self) -> u16 {
        ((1u32 << self.bit_width) - 1) as u16
    }

    /// Workspace distance between neighbouring codes
    pub fn resolution(&self) -> f64 {
        2.0 * self.bound / f64::from(self.max_code())
    }

    pub fn decode(&self, code: u16) -> f64 {
        -self.bound + f64::from(code) * self.resolution()
    }

    /// Nearest code, saturating at the ends of the range
    pub fn encode(&self, value: f64) -> u16 {
        let code = ((value + self.bound) / self.resolution()).round();
        code.clamp(0.0, f64::from(self.max_code())) as u16
    }

    pub fn decode_all(&self, chromosome: &Chromosome) -> Vec<f64> {
        chromosome.genes().iter().map(|&code| self.decode(code)).collect()
    }
}
