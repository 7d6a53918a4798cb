use crate::engines::generation::chromosome::{Chromosome, Encoding};
use rand::Rng;

/// Cumulative selection probabilities proportional to fitness.
///
/// Falls back to a uniform wheel when no individual has positive fitness.
pub fn roulette_cdf(fitness: &[f64]) -> Vec<f64> {
    let n = fitness.len();
    let total: f64 = fitness.iter().map(|f| f.max(0.0)).sum();

    if !(total.is_finite() && total > 0.0) {
        return (1..=n).map(|i| i as f64 / n as f64).collect();
    }

    let mut running = 0.0;
    let mut cdf: Vec<f64> = fitness
        .iter()
        .map(|f| {
            running += f.max(0.0) / total;
            running
        })
        .collect();
    // Rounding must not leave a gap above the last slot
    if let Some(last) = cdf.last_mut() {
        *last = 1.0;
    }
    cdf
}

/// Inverse-CDF lookup: first slot whose cumulative probability reaches `u`
pub fn select_index(cdf: &[f64], u: f64) -> usize {
    cdf.partition_point(|&c| c < u).min(cdf.len().saturating_sub(1))
}

/// Single-point crossover: children swap every gene from `locus` on
pub fn crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    locus: usize,
) -> (Chromosome, Chromosome) {
    let len = parent1.len().min(parent2.len());
    let point = locus.min(len);

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1.genes_mut()[point..len].copy_from_slice(&parent2.genes()[point..len]);
    child2.genes_mut()[point..len].copy_from_slice(&parent1.genes()[point..len]);

    (child1, child2)
}

/// Toggle bit `bit` (0 = least significant) of a quantized coordinate
pub fn flip_bit(code: u16, bit: u32) -> u16 {
    code ^ (1u16 << bit)
}

/// Mutation: flip one random bit of one random coordinate
pub fn mutate<R: Rng>(chromosome: &mut Chromosome, bit_width: u32, rng: &mut R) {
    if chromosome.is_empty() {
        return;
    }
    let gene = rng.gen_range(0..chromosome.len());
    let bit = rng.gen_range(0..bit_width);
    let genes = chromosome.genes_mut();
    genes[gene] = flip_bit(genes[gene], bit);
}

/// Rejection-sample a chromosome whose via points all lie strictly inside
/// the annulus `(inner, outer)`.
///
/// Returns `None` after `max_attempts` draws without success.
pub fn random_chromosome<R: Rng>(
    via_points: usize,
    encoding: &Encoding,
    annulus: (f64, f64),
    max_attempts: usize,
    rng: &mut R,
) -> Option<Chromosome> {
    let (inner, outer) = annulus;
    let max_code = encoding.max_code();

    for _ in 0..max_attempts {
        let genes: Vec<u16> = (0..2 * via_points)
            .map(|_| rng.gen_range(0..=max_code))
            .collect();

        let inside = genes.chunks_exact(2).all(|pair| {
            let r = encoding.decode(pair[0]).hypot(encoding.decode(pair[1]));
            r > inner && r < outer
        });
        if inside {
            return Some(Chromosome::new(genes));
        }
    }
    None
}
