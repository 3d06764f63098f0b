//! Sample selection for the correspondence stage.
//!
//! The matcher never sees the banks directly. It asks a [`SampleSelector`]
//! for points of a given [`ShapeRole`], and the [`BankSampler`] resolves the
//! request against the run's [`SamplingContext`]:
//!
//! | request | resolved count | pool |
//! |---|---|---|
//! | `Some(n)`, `n > 0` | `n` | role bank (empty bank → [`ComboError::InsufficientSamples`]) |
//! | unset, explicit count configured | configured count | full set |
//! | unset, `min(|SB|, |TB|) / 50 > 0` | that quotient | full set |
//! | unset, quotient is 0 | `fallback_count` | full set |
//!
//! The banks bias the search only through explicit requests; otherwise they
//! merely size the draw.
//!
//! Draws pick distinct indices with a freshly seeded `StdRng` and return the
//! chosen points in pool order, so two pools of equal length yield the same
//! index set for the same seed.
use crate::bank::SampleBank;
use crate::error::{ComboError, Result};
use crate::types::{Point, ShapeRole};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Bank-derived default count is `min(|SB|, |TB|) / DEFAULT_COUNT_DIVISOR`.
pub const DEFAULT_COUNT_DIVISOR: usize = 50;

/// Per-run state the sampler reads. Built once per run, never mutated.
#[derive(Clone, Debug, Default)]
pub struct SamplingContext {
    pub source_bank: SampleBank,
    pub target_bank: SampleBank,
}

impl SamplingContext {
    pub fn new(source_bank: SampleBank, target_bank: SampleBank) -> Self {
        Self {
            source_bank,
            target_bank,
        }
    }

    pub fn bank(&self, role: ShapeRole) -> &SampleBank {
        match role {
            ShapeRole::Source => &self.source_bank,
            ShapeRole::Target => &self.target_bank,
        }
    }

    /// `floor(min(|SB|, |TB|) / 50)`.
    pub fn default_count(&self) -> usize {
        self.source_bank.len().min(self.target_bank.len()) / DEFAULT_COUNT_DIVISOR
    }
}

/// Where a sample count came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CountOrigin {
    Requested,
    Explicit,
    BankDefault,
    Fallback,
}

/// Which point array a draw is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SamplePool {
    Bank,
    FullSet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingPlan {
    pub role: ShapeRole,
    pub count: usize,
    pub origin: CountOrigin,
    pub pool: SamplePool,
}

/// Count/pool resolution rules shared by every draw of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingPolicy {
    /// Explicit count used when the matcher does not request one.
    pub explicit_count: Option<usize>,
    /// Count drawn from the full set when no other count is available.
    pub fallback_count: usize,
    pub seed: u64,
}

impl SamplingPolicy {
    pub fn plan(
        &self,
        ctx: &SamplingContext,
        role: ShapeRole,
        requested: Option<usize>,
    ) -> SamplingPlan {
        let plan = |count, origin, pool| SamplingPlan {
            role,
            count,
            origin,
            pool,
        };
        if let Some(n) = requested.filter(|&n| n > 0) {
            return plan(n, CountOrigin::Requested, SamplePool::Bank);
        }
        if let Some(n) = self.explicit_count.filter(|&n| n > 0) {
            return plan(n, CountOrigin::Explicit, SamplePool::FullSet);
        }
        match ctx.default_count() {
            0 => plan(
                self.fallback_count,
                CountOrigin::Fallback,
                SamplePool::FullSet,
            ),
            n => plan(n, CountOrigin::BankDefault, SamplePool::FullSet),
        }
    }
}

/// Up to `count` points of `pool` at distinct random indices, in pool order.
///
/// Returns the whole pool when `count >= pool.len()`.
pub fn indexed_samples(pool: &[Point], count: usize, seed: u64) -> Vec<Point> {
    if count >= pool.len() {
        return pool.to_vec();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut idx = rand::seq::index::sample(&mut rng, pool.len(), count).into_vec();
    idx.sort_unstable();
    idx.into_iter().map(|i| pool[i]).collect()
}

/// Supplies sample points to a correspondence matcher.
pub trait SampleSelector {
    /// Draw samples for the shape `role`, whose full point array is `full`.
    /// `requested` of `None` or `Some(0)` asks the selector for its default.
    fn select(
        &mut self,
        role: ShapeRole,
        full: &[Point],
        requested: Option<usize>,
    ) -> Result<Vec<Point>>;
}

/// Selector biased towards high-discrepancy regions via the run's banks.
pub struct BankSampler<'a> {
    ctx: &'a SamplingContext,
    policy: SamplingPolicy,
    history: Vec<SamplingPlan>,
}

impl<'a> BankSampler<'a> {
    pub fn new(ctx: &'a SamplingContext, policy: SamplingPolicy) -> Self {
        Self {
            ctx,
            policy,
            history: Vec::new(),
        }
    }

    /// Plans of every draw served so far, oldest first.
    pub fn history(&self) -> &[SamplingPlan] {
        &self.history
    }

    pub fn into_history(self) -> Vec<SamplingPlan> {
        self.history
    }
}

impl SampleSelector for BankSampler<'_> {
    fn select(
        &mut self,
        role: ShapeRole,
        full: &[Point],
        requested: Option<usize>,
    ) -> Result<Vec<Point>> {
        let plan = self.policy.plan(self.ctx, role, requested);
        let pool = match plan.pool {
            SamplePool::Bank => self.ctx.bank(role).points(),
            SamplePool::FullSet => full,
        };
        let samples = indexed_samples(pool, plan.count, self.policy.seed);
        debug!(
            "BankSampler: {role} drew {}/{} from {:?} ({:?}, pool={})",
            samples.len(),
            plan.count,
            plan.pool,
            plan.origin,
            pool.len()
        );
        self.history.push(plan);
        if samples.is_empty() {
            return Err(ComboError::InsufficientSamples {
                role,
                pool_len: pool.len(),
            });
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DiscrepancyGrid;

    fn bank_of(len: usize) -> SampleBank {
        // one hot cell with value len + 2 expands to `len` copies
        let mut grid = DiscrepancyGrid::new(4, 4);
        if len > 0 {
            grid.set(1, 2, len as u32 + 2);
        }
        SampleBank::from_discrepancy(&grid)
    }

    fn policy() -> SamplingPolicy {
        SamplingPolicy {
            explicit_count: None,
            fallback_count: 10,
            seed: 7,
        }
    }

    fn line(n: i32) -> Vec<Point> {
        (0..n).map(|i| Point::new(i, 2 * i)).collect()
    }

    #[test]
    fn default_count_uses_smaller_bank() {
        let ctx = SamplingContext::new(bank_of(100), bank_of(250));
        assert_eq!(ctx.default_count(), 2);
        let plan = policy().plan(&ctx, ShapeRole::Target, None);
        assert_eq!(plan.count, 2);
        assert_eq!(plan.origin, CountOrigin::BankDefault);
        assert_eq!(plan.pool, SamplePool::FullSet);
    }

    #[test]
    fn requested_count_wins_over_configuration() {
        let ctx = SamplingContext::new(bank_of(100), bank_of(250));
        let policy = SamplingPolicy {
            explicit_count: Some(30),
            ..policy()
        };
        let plan = policy.plan(&ctx, ShapeRole::Source, Some(4));
        assert_eq!((plan.count, plan.origin), (4, CountOrigin::Requested));
        assert_eq!(plan.pool, SamplePool::Bank);
        let plan = policy.plan(&ctx, ShapeRole::Source, Some(0));
        assert_eq!((plan.count, plan.origin), (30, CountOrigin::Explicit));
        assert_eq!(plan.pool, SamplePool::FullSet);
    }

    #[test]
    fn empty_banks_fall_back_to_full_set() {
        let ctx = SamplingContext::default();
        let full = line(25);
        let mut sampler = BankSampler::new(&ctx, policy());
        let samples = sampler.select(ShapeRole::Source, &full, None).unwrap();
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|p| full.contains(p)));
        assert_eq!(sampler.history()[0].pool, SamplePool::FullSet);
        assert_eq!(sampler.history()[0].origin, CountOrigin::Fallback);
    }

    #[test]
    fn empty_everything_is_insufficient() {
        let ctx = SamplingContext::default();
        let mut sampler = BankSampler::new(&ctx, policy());
        let err = sampler.select(ShapeRole::Target, &[], None).unwrap_err();
        assert_eq!(
            err,
            ComboError::InsufficientSamples {
                role: ShapeRole::Target,
                pool_len: 0
            }
        );
    }

    #[test]
    fn requested_draw_stays_in_role_bank() {
        let ctx = SamplingContext::new(bank_of(60), SampleBank::default());
        let mut sampler = BankSampler::new(&ctx, policy());
        let full = line(40);
        let src = sampler.select(ShapeRole::Source, &full, Some(5)).unwrap();
        assert_eq!(src, vec![Point::new(1, 2); 5]);
        // an explicit request never falls back to the full set
        let err = sampler
            .select(ShapeRole::Target, &full, Some(5))
            .unwrap_err();
        assert_eq!(
            err,
            ComboError::InsufficientSamples {
                role: ShapeRole::Target,
                pool_len: 0
            }
        );
        assert_eq!(sampler.history()[1].pool, SamplePool::Bank);
    }

    #[test]
    fn configured_count_draws_distinct_points_from_full_set() {
        let ctx = SamplingContext::new(bank_of(38), bank_of(38));
        let policy = SamplingPolicy {
            explicit_count: Some(6),
            ..policy()
        };
        let mut sampler = BankSampler::new(&ctx, policy);
        let full = line(20);
        let samples = sampler.select(ShapeRole::Source, &full, None).unwrap();
        assert_eq!(samples.len(), 6);
        assert!(samples.windows(2).all(|w| w[0].x < w[1].x));
        assert!(samples.iter().all(|p| full.contains(p)));
        assert_eq!(sampler.history()[0].origin, CountOrigin::Explicit);
        assert_eq!(sampler.history()[0].pool, SamplePool::FullSet);
    }

    #[test]
    fn draws_are_deterministic_and_ordered() {
        let pool = line(200);
        let a = indexed_samples(&pool, 17, 99);
        let b = indexed_samples(&pool, 17, 99);
        assert_eq!(a, b);
        assert_eq!(a.len(), 17);
        assert!(a.windows(2).all(|w| w[0].x < w[1].x));
        assert_eq!(indexed_samples(&pool[..3], 17, 99), pool[..3].to_vec());
    }
}
