//! Simulation tunables and random-draw helpers.
//!
//! Every delay and range lives on [`SimConfig`] rather than in constants so
//! integration tests can shrink the clock without touching the actors.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Display names for the store departments.
pub const DEPARTMENT_NAMES: [&str; 10] = [
    "Paint",
    "Carpentry",
    "Plumbing & Heating",
    "Lighting",
    "Flooring",
    "Garden",
    "Household",
    "Decoration",
    "Tools",
    "Hardware",
];

/// Name of a department, for logs and the monitor.
pub fn department_name(department: usize) -> &'static str {
    DEPARTMENT_NAMES.get(department).copied().unwrap_or("?")
}

/// An inclusive delay interval sampled uniformly.
#[derive(Debug, Clone, Copy)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Uniform draw from `[min, max]`; a collapsed or inverted range yields
    /// `min`, which is what makes deterministic test runs possible.
    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        let span = (self.max - self.min).as_millis() as u64;
        self.min + Duration::from_millis(rng.gen_range(0..=span))
    }
}

/// All tunables of one simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of departments; each must be covered by at least one seller.
    pub departments: usize,
    /// Capacity of every waiting queue.
    pub queue_capacity: usize,
    /// Seller-customer discussion duration.
    pub discussion: DelayRange,
    /// Payment handling duration at the till.
    pub payment: DelayRange,
    /// Time a buying customer takes to walk to the till.
    pub checkout_walk: Duration,
    /// Purchase amount interval, whole euros.
    pub amount_min: u64,
    pub amount_max: u64,
    /// Chance that a consultation ends in a purchase, percent.
    pub purchase_probability: u8,
    /// Amount charged when no purchase is on record at the till.
    pub fallback_amount: u64,
    /// Back-off between receive attempts.
    pub poll_interval: Duration,
    /// Seed for reproducible draws; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            departments: DEPARTMENT_NAMES.len(),
            queue_capacity: 20,
            discussion: DelayRange::new(Duration::from_secs(1), Duration::from_secs(3)),
            payment: DelayRange::new(Duration::from_secs(1), Duration::from_secs(2)),
            checkout_walk: Duration::from_secs(1),
            amount_min: 10,
            amount_max: 500,
            purchase_probability: 65,
            fallback_amount: 10,
            poll_interval: Duration::from_millis(50),
            rng_seed: None,
        }
    }
}

impl SimConfig {
    /// Uniform purchase amount draw from `[amount_min, amount_max]`.
    pub fn sample_amount(&self, rng: &mut impl Rng) -> u64 {
        if self.amount_min >= self.amount_max {
            return self.amount_min;
        }
        rng.gen_range(self.amount_min..=self.amount_max)
    }

    /// RNG for one actor: derived from the run seed and the actor's
    /// identity so runs with a fixed seed are reproducible per actor.
    pub fn actor_rng(&self, salt: u64) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(salt)),
            None => StdRng::from_entropy(),
        }
    }
}

/// True with the given probability in percent; saturates at 0 and 100.
pub fn chance(rng: &mut impl Rng, percent: u8) -> bool {
    if percent >= 100 {
        return true;
    }
    if percent == 0 {
        return false;
    }
    rng.gen_range(0..100) < percent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chance_saturates_at_the_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(chance(&mut rng, 100));
            assert!(!chance(&mut rng, 0));
        }
    }

    #[test]
    fn collapsed_ranges_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(2);
        let range = DelayRange::new(Duration::from_millis(7), Duration::from_millis(7));
        assert_eq!(range.sample(&mut rng), Duration::from_millis(7));

        let config = SimConfig {
            amount_min: 42,
            amount_max: 42,
            ..SimConfig::default()
        };
        assert_eq!(config.sample_amount(&mut rng), 42);
    }

    #[test]
    fn sampled_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = DelayRange::new(Duration::from_millis(10), Duration::from_millis(30));
        let config = SimConfig::default();
        for _ in 0..200 {
            let delay = range.sample(&mut rng);
            assert!(delay >= range.min && delay <= range.max);
            let amount = config.sample_amount(&mut rng);
            assert!((config.amount_min..=config.amount_max).contains(&amount));
        }
    }

    #[test]
    fn seeded_actor_rngs_are_reproducible() {
        let config = SimConfig {
            rng_seed: Some(99),
            ..SimConfig::default()
        };
        let mut first = config.actor_rng(3);
        let mut second = config.actor_rng(3);
        let a: Vec<u64> = (0..5).map(|_| first.gen()).collect();
        let b: Vec<u64> = (0..5).map(|_| second.gen()).collect();
        assert_eq!(a, b);
    }
}
