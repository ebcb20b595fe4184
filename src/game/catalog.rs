//! Static game content: the education ladder, jobs, upgrades, real estate and
//! achievements. Everything here is read-only and available at startup.

use super::state::EconomyState;

/// One rung of the education ladder. Its index in [`EDUCATION_TIERS`] is its rank.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EducationTier {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    /// Study time in seconds. Zero for the starting tier, which is never studied.
    pub study_secs: u64,
}

/// Education tiers in progression order.
pub static EDUCATION_TIERS: [EducationTier; 5] = [
    EducationTier {
        id: "None",
        name: "No Education",
        cost: 0.0,
        study_secs: 0,
    },
    EducationTier {
        id: "Diploma",
        name: "High School Diploma",
        cost: 100.0,
        study_secs: 10,
    },
    EducationTier {
        id: "Associate",
        name: "College",
        cost: 5_000.0,
        study_secs: 30,
    },
    EducationTier {
        id: "Bachelor",
        name: "Bachelor's Degree",
        cost: 50_000.0,
        study_secs: 60,
    },
    EducationTier {
        id: "Master",
        name: "Master's (MBA)",
        cost: 250_000.0,
        study_secs: 90,
    },
];

/// A job on the career ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JobTier {
    pub id: &'static str,
    pub name: &'static str,
    /// Education tier id that must be reached before taking this job.
    pub required_education: &'static str,
    pub salary: f64,
    pub icon: &'static str,
}

/// Job the player holds at the start and while studying.
pub const UNEMPLOYED: &str = "Unemployed";

pub static JOB_TIERS: [JobTier; 6] = [
    JobTier {
        id: UNEMPLOYED,
        name: "Unemployed",
        required_education: "None",
        salary: 0.0,
        icon: "🛑",
    },
    JobTier {
        id: "Janitor",
        name: "Janitor",
        required_education: "None",
        salary: 1.0,
        icon: "🧹",
    },
    JobTier {
        id: "OfficeAssistant",
        name: "Office Assistant",
        required_education: "Diploma",
        salary: 5.0,
        icon: "🗂",
    },
    JobTier {
        id: "TeamLead",
        name: "Team Lead",
        required_education: "Associate",
        salary: 20.0,
        icon: "👔",
    },
    JobTier {
        id: "CFO",
        name: "Chief Financial Officer",
        required_education: "Bachelor",
        salary: 100.0,
        icon: "📈",
    },
    JobTier {
        id: "Director",
        name: "Chief Executive",
        required_education: "Master",
        salary: 500.0,
        icon: "👑",
    },
];

/// A one-time purchase that boosts click value and/or passive rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Upgrade {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub click_bonus: f64,
    pub rate_bonus: f64,
    pub icon: &'static str,
}

pub static UPGRADES: [Upgrade; 5] = [
    Upgrade {
        id: "mouse",
        name: "Ergonomic Mouse",
        cost: 50.0,
        click_bonus: 2.0,
        rate_bonus: 0.0,
        icon: "🖱",
    },
    Upgrade {
        id: "chair",
        name: "Office Chair",
        cost: 250.0,
        click_bonus: 5.0,
        rate_bonus: 0.0,
        icon: "💺",
    },
    Upgrade {
        id: "autov1",
        name: "Auto-Clicker V1",
        cost: 1_000.0,
        click_bonus: 0.0,
        rate_bonus: 1.0,
        icon: "🤖",
    },
    Upgrade {
        id: "pc",
        name: "Gaming PC",
        cost: 5_000.0,
        click_bonus: 15.0,
        rate_bonus: 0.0,
        icon: "🖥",
    },
    Upgrade {
        id: "autov2",
        name: "Auto-Clicker V2",
        cost: 50_000.0,
        click_bonus: 0.0,
        rate_bonus: 5.0,
        icon: "⚡",
    },
];

/// Property that can be bought any number of times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealEstateAsset {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub income: f64,
    pub icon: &'static str,
}

pub static REAL_ESTATE: [RealEstateAsset; 5] = [
    RealEstateAsset {
        id: "box",
        name: "Cardboard Box",
        cost: 10.0,
        income: 0.0,
        icon: "📦",
    },
    RealEstateAsset {
        id: "studio",
        name: "Studio Flat",
        cost: 2_000.0,
        income: 5.0,
        icon: "🏠",
    },
    RealEstateAsset {
        id: "house",
        name: "Country House",
        cost: 50_000.0,
        income: 50.0,
        icon: "🏡",
    },
    RealEstateAsset {
        id: "penthouse",
        name: "Penthouse",
        cost: 500_000.0,
        income: 300.0,
        icon: "🏙",
    },
    RealEstateAsset {
        id: "island",
        name: "Private Island",
        cost: 10_000_000.0,
        income: 5_000.0,
        icon: "🏝",
    },
];

/// A one-time reward granted when `requirement` first holds.
#[derive(Clone, Copy, Debug)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub reward: f64,
    /// Must be pure: evaluated repeatedly against arbitrary states.
    pub requirement: fn(&EconomyState) -> bool,
}

impl Achievement {
    pub fn is_met(&self, state: &EconomyState) -> bool {
        (self.requirement)(state)
    }
}

fn made_first_click(state: &EconomyState) -> bool {
    state.total_clicks >= 1
}

fn made_hundred_clicks(state: &EconomyState) -> bool {
    state.total_clicks >= 100
}

fn has_a_job(state: &EconomyState) -> bool {
    state.job_id != UNEMPLOYED
}

fn earned_a_million(state: &EconomyState) -> bool {
    state.total_earned >= 1_000_000.0
}

fn owns_property(state: &EconomyState) -> bool {
    !state.owned_assets.is_empty()
}

fn runs_the_company(state: &EconomyState) -> bool {
    state.job_id == "Director"
}

/// Achievements in evaluation (and notification) order.
pub static ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: "first_click",
        name: "First Step",
        description: "Make your first click",
        icon: "👆",
        reward: 50.0,
        requirement: made_first_click,
    },
    Achievement {
        id: "click_master",
        name: "Click Master",
        description: "Make 100 clicks",
        icon: "💪",
        reward: 500.0,
        requirement: made_hundred_clicks,
    },
    Achievement {
        id: "first_job",
        name: "First Job",
        description: "Get your first job",
        icon: "👔",
        reward: 100.0,
        requirement: has_a_job,
    },
    Achievement {
        id: "millionaire",
        name: "Millionaire",
        description: "Earn $1,000,000 in total",
        icon: "💰",
        reward: 10_000.0,
        requirement: earned_a_million,
    },
    Achievement {
        id: "real_estate",
        name: "Realtor",
        description: "Buy your first property",
        icon: "🏠",
        reward: 1_000.0,
        requirement: owns_property,
    },
    Achievement {
        id: "ceo",
        name: "Chief Executive",
        description: "Become the chief executive",
        icon: "👑",
        reward: 50_000.0,
        requirement: runs_the_company,
    },
];

// ── Lookups ────────────────────────────────────────────────────

pub fn education_tier(id: &str) -> Option<&'static EducationTier> {
    EDUCATION_TIERS.iter().find(|t| t.id == id)
}

/// Position of an education tier in the ladder, `None` for unknown ids.
pub fn education_rank(id: &str) -> Option<usize> {
    EDUCATION_TIERS.iter().position(|t| t.id == id)
}

pub fn job_tier(id: &str) -> Option<&'static JobTier> {
    JOB_TIERS.iter().find(|j| j.id == id)
}

pub fn upgrade(id: &str) -> Option<&'static Upgrade> {
    UPGRADES.iter().find(|u| u.id == id)
}

pub fn real_estate(id: &str) -> Option<&'static RealEstateAsset> {
    REAL_ESTATE.iter().find(|a| a.id == id)
}

#[cfg_attr(not(test), allow(dead_code))]
pub fn achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn education_ranks_follow_table_order() {
        assert_eq!(education_rank("None"), Some(0));
        assert_eq!(education_rank("Diploma"), Some(1));
        assert_eq!(education_rank("Master"), Some(4));
        assert_eq!(education_rank("PhD"), None);
    }

    #[test]
    fn education_costs_and_durations_increase() {
        for pair in EDUCATION_TIERS.windows(2) {
            assert!(pair[1].cost > pair[0].cost, "{} not dearer", pair[1].id);
            assert!(pair[1].study_secs > pair[0].study_secs);
        }
    }

    #[test]
    fn first_job_tier_is_unemployed_with_no_salary() {
        assert_eq!(JOB_TIERS[0].id, UNEMPLOYED);
        assert_eq!(JOB_TIERS[0].salary, 0.0);
    }

    #[test]
    fn every_job_requires_a_known_education() {
        for job in &JOB_TIERS {
            assert!(
                education_tier(job.required_education).is_some(),
                "{} requires unknown tier {}",
                job.id,
                job.required_education
            );
        }
    }

    #[test]
    fn ids_are_unique_per_table() {
        fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> bool {
            let mut seen = HashSet::new();
            ids.into_iter().all(|id| seen.insert(id))
        }
        assert!(unique(EDUCATION_TIERS.iter().map(|t| t.id)));
        assert!(unique(JOB_TIERS.iter().map(|j| j.id)));
        assert!(unique(UPGRADES.iter().map(|u| u.id)));
        assert!(unique(REAL_ESTATE.iter().map(|a| a.id)));
        assert!(unique(ACHIEVEMENTS.iter().map(|a| a.id)));
    }

    #[test]
    fn every_upgrade_boosts_something() {
        for u in &UPGRADES {
            assert!(u.click_bonus + u.rate_bonus > 0.0, "{} gives no benefit", u.id);
        }
    }

    #[test]
    fn lookups_miss_on_unknown_ids() {
        assert!(job_tier("Astronaut").is_none());
        assert!(upgrade("keyboard").is_none());
        assert!(real_estate("castle").is_none());
        assert!(achievement("speedrun").is_none());
    }

    #[test]
    fn lookups_hit_catalog_entries() {
        assert_eq!(real_estate("box").map(|a| a.cost), Some(10.0));
        assert_eq!(upgrade("autov1").map(|u| u.rate_bonus), Some(1.0));
        assert_eq!(job_tier("CFO").map(|j| j.salary), Some(100.0));
        assert_eq!(achievement("first_click").map(|a| a.reward), Some(50.0));
    }

    #[test]
    fn achievement_predicates_start_unmet() {
        let state = EconomyState::new();
        for a in &ACHIEVEMENTS {
            assert!(!a.is_met(&state), "{} met on a fresh state", a.id);
        }
    }
}
