//! Economy state and the pure derivations computed from it.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;

use super::catalog::{
    education_rank, education_tier, job_tier, real_estate, EducationTier, JobTier,
    EDUCATION_TIERS, JOB_TIERS, UNEMPLOYED,
};

/// The whole mutable game economy.
///
/// Transitions never edit a live value in place: they clone, modify the copy
/// and hand it back, so a rejected intent cannot leave a half-applied state.
#[derive(Clone, Debug, PartialEq)]
pub struct EconomyState {
    pub cash: f64,
    /// Cached `cash + asset value`, refreshed at the end of every transition.
    pub net_worth: f64,
    pub click_value: f64,
    /// Passive income from upgrades only (separate from salary and assets).
    pub auto_click_rate: f64,
    /// Id of the highest completed education tier.
    pub education_level: String,
    pub job_id: String,
    /// Asset id → number owned.
    pub owned_assets: BTreeMap<String, u32>,
    pub purchased_upgrades: BTreeSet<String>,
    /// Only ever grows.
    pub unlocked_achievements: BTreeSet<String>,
    pub total_clicks: u64,
    pub total_earned: f64,
    /// Epoch milliseconds at which the current study finishes; 0 = not studying.
    pub study_end_time: u64,
}

impl EconomyState {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            cash: config.starting_cash,
            net_worth: config.starting_cash,
            click_value: config.starting_click_value,
            auto_click_rate: 0.0,
            education_level: EDUCATION_TIERS[0].id.to_string(),
            job_id: UNEMPLOYED.to_string(),
            owned_assets: BTreeMap::new(),
            purchased_upgrades: BTreeSet::new(),
            unlocked_achievements: BTreeSet::new(),
            total_clicks: 0,
            total_earned: 0.0,
            study_end_time: 0,
        }
    }

    /// Studying blocks manual clicking.
    pub fn is_studying(&self) -> bool {
        self.study_end_time > 0
    }
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Passive income split by source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IncomeBreakdown {
    pub salary: f64,
    pub assets: f64,
    pub auto_click: f64,
}

impl IncomeBreakdown {
    pub fn total(&self) -> f64 {
        self.salary + self.assets + self.auto_click
    }
}

pub fn income_breakdown(state: &EconomyState) -> IncomeBreakdown {
    IncomeBreakdown {
        salary: job_tier(&state.job_id).map_or(0.0, |j| j.salary),
        assets: state
            .owned_assets
            .iter()
            .filter_map(|(id, &count)| real_estate(id).map(|a| a.income * count as f64))
            .sum(),
        auto_click: state.auto_click_rate,
    }
}

/// Salary + asset income + upgrade auto-click rate. Unknown ids contribute 0.
pub fn passive_income_per_tick(state: &EconomyState) -> f64 {
    income_breakdown(state).total()
}

/// Purchase value of everything owned. Unknown ids contribute 0.
pub fn asset_value(state: &EconomyState) -> f64 {
    state
        .owned_assets
        .iter()
        .filter_map(|(id, &count)| real_estate(id).map(|a| a.cost * count as f64))
        .sum()
}

pub fn net_worth(state: &EconomyState) -> f64 {
    state.cash + asset_value(state)
}

/// The tier that the next completed study would reach, if any.
///
/// An unrecognised current level behaves like "below the first tier".
pub fn next_education_tier(state: &EconomyState) -> Option<&'static EducationTier> {
    let next = education_rank(&state.education_level).map_or(0, |rank| rank + 1);
    EDUCATION_TIERS.get(next)
}

/// Falls back to the first tier for unknown ids.
pub fn current_education(state: &EconomyState) -> &'static EducationTier {
    education_tier(&state.education_level).unwrap_or(&EDUCATION_TIERS[0])
}

/// Falls back to unemployment for unknown ids.
pub fn current_job(state: &EconomyState) -> &'static JobTier {
    job_tier(&state.job_id).unwrap_or(&JOB_TIERS[0])
}

/// Whether the player's education rank reaches the job's requirement.
pub fn can_take_job(state: &EconomyState, job: &JobTier) -> bool {
    // None orders below every Some, so an unknown current level qualifies
    // for nothing and an unknown requirement blocks nobody.
    education_rank(&state.education_level) >= education_rank(job.required_education)
}

/// Whole seconds of study left at `now_ms`, floored.
pub fn study_remaining_secs(state: &EconomyState, now_ms: u64) -> u64 {
    if !state.is_studying() {
        return 0;
    }
    state.study_end_time.saturating_sub(now_ms) / 1000
}

/// Fraction of the current study already done, in `[0, 1]`.
pub fn study_progress(state: &EconomyState, now_ms: u64) -> f64 {
    if !state.is_studying() {
        return 0.0;
    }
    let total_ms = next_education_tier(state).map_or(0, |t| t.study_secs * 1000);
    if total_ms == 0 {
        return 1.0;
    }
    let remaining = state.study_end_time.saturating_sub(now_ms) as f64;
    (1.0 - remaining / total_ms as f64).clamp(0.0, 1.0)
}

pub fn owned_asset_total(state: &EconomyState) -> u32 {
    state.owned_assets.values().sum()
}
