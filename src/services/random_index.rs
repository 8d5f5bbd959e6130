use rand::Rng;

/// Source of uniformly distributed indices.
///
/// Used both to draw throughput samples and to pick a project within a
/// priority tier. `upper_bound` is always non-zero.
pub trait RandomIndexSource {
    fn next_index(&mut self, upper_bound: usize) -> usize;
}

impl<S: RandomIndexSource + ?Sized> RandomIndexSource for &mut S {
    fn next_index(&mut self, upper_bound: usize) -> usize {
        (**self).next_index(upper_bound)
    }
}

pub struct RngIndexSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngIndexSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomIndexSource for RngIndexSource<R> {
    fn next_index(&mut self, upper_bound: usize) -> usize {
        self.rng.gen_range(0..upper_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rng_index_source_stays_within_bounds() {
        let mut source = RngIndexSource::new(StdRng::seed_from_u64(7));
        for upper_bound in 1..20 {
            for _ in 0..50 {
                assert!(source.next_index(upper_bound) < upper_bound);
            }
        }
    }

    #[test]
    fn rng_index_source_eventually_returns_every_index() {
        let mut source = RngIndexSource::new(StdRng::seed_from_u64(11));
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[source.next_index(4)] = true;
        }
        assert!(seen.iter().all(|value| *value));
    }

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut first = RngIndexSource::new(StdRng::seed_from_u64(3));
        let mut second = RngIndexSource::new(StdRng::seed_from_u64(3));
        let a: Vec<usize> = (0..10).map(|_| first.next_index(100)).collect();
        let b: Vec<usize> = (0..10).map(|_| second.next_index(100)).collect();
        assert_eq!(a, b);
    }
}
