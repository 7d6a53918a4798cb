use crate::engines::generation::chromosome::Chromosome;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
pub struct EliteChromosome {
    pub chromosome: Chromosome,
    pub fitness: f64,
    pub generation: usize, // First generation it was scored in
}

/// Best distinct feasible chromosomes seen over a run, fittest first
pub struct HallOfFame {
    entries: Vec<EliteChromosome>,
    max_size: usize,
    seen: HashSet<Chromosome>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_size: max_size.max(1),
            seen: HashSet::new(),
        }
    }

    /// Attempt to add a chromosome; infeasible and duplicate ones are rejected
    pub fn try_add(&mut self, chromosome: &Chromosome, fitness: f64, generation: usize) -> bool {
        if !(fitness > 0.0) || self.seen.contains(chromosome) {
            return false;
        }
        if self.entries.len() == self.max_size
            && self.entries.last().is_some_and(|worst| worst.fitness >= fitness)
        {
            return false;
        }

        self.seen.insert(chromosome.clone());
        // Ties keep the earlier entry first
        let position = self.entries.partition_point(|e| e.fitness >= fitness);
        self.entries.insert(
            position,
            EliteChromosome {
                chromosome: chromosome.clone(),
                fitness,
                generation,
            },
        );

        if self.entries.len() > self.max_size {
            if let Some(removed) = self.entries.pop() {
                self.seen.remove(&removed.chromosome);
            }
        }
        true
    }

    pub fn best(&self) -> Option<&EliteChromosome> {
        self.entries.first()
    }

    pub fn get_all(&self) -> &[EliteChromosome] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chromosome(tag: u16) -> Chromosome {
        Chromosome::new(vec![tag, tag])
    }

    #[test]
    fn test_keeps_fittest_distinct() {
        let mut hall = HallOfFame::new(2);
        assert!(hall.try_add(&chromosome(1), 0.5, 0));
        assert!(!hall.try_add(&chromosome(1), 0.5, 1));
        assert!(hall.try_add(&chromosome(2), 0.9, 1));
        assert!(hall.try_add(&chromosome(3), 0.7, 2));
        assert!(!hall.try_add(&chromosome(4), 0.1, 2));

        let fitness: Vec<f64> = hall.get_all().iter().map(|e| e.fitness).collect();
        assert_eq!(fitness, vec![0.9, 0.7]);
        assert_eq!(hall.best().map(|e| e.generation), Some(1));
    }

    #[test]
    fn test_rejects_infeasible() {
        let mut hall = HallOfFame::new(3);
        assert!(!hall.try_add(&chromosome(1), 0.0, 0));
        assert!(!hall.try_add(&chromosome(2), f64::NAN, 0));
        assert!(hall.is_empty());
    }

    #[test]
    fn test_evicted_entry_can_return() {
        let mut hall = HallOfFame::new(1);
        hall.try_add(&chromosome(1), 0.2, 0);
        hall.try_add(&chromosome(2), 0.4, 1);
        assert!(!hall.try_add(&chromosome(1), 0.2, 2));
        assert_eq!(hall.len(), 1);
        assert!(hall.try_add(&chromosome(1), 0.8, 3));
    }
}
