//! Fire-and-forget events for the presentation layer.

use super::format::format_money;
use super::logic::Rejection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Purchased,
    InsufficientFunds,
    StudyStarted,
    StudyCompleted,
    JobChanged,
    AchievementUnlocked,
    /// A click was refused because the player is in school.
    Studying,
    /// Any other refused purchase.
    Rejected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    /// Money involved (price, salary, reward), when there is one.
    pub amount: Option<f64>,
}

impl Notification {
    fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        description: impl Into<String>,
        amount: Option<f64>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            amount,
        }
    }

    pub fn purchased(name: &str, cost: f64) -> Self {
        Self::new(
            NotificationKind::Purchased,
            "Purchase successful",
            format!("Bought {} for {}", name, format_money(cost)),
            Some(cost),
        )
    }

    pub fn insufficient_funds(name: &str, cost: f64, cash: f64) -> Self {
        Self::new(
            NotificationKind::InsufficientFunds,
            "Not enough money",
            format!(
                "{} costs {} (you have {})",
                name,
                format_money(cost),
                format_money(cash)
            ),
            Some(cost),
        )
    }

    pub fn study_started(name: &str, cost: f64, study_secs: u64) -> Self {
        Self::new(
            NotificationKind::StudyStarted,
            "Back to school",
            format!("Studying for {} ({}s). You left your job.", name, study_secs),
            Some(cost),
        )
    }

    pub fn study_completed(name: &str) -> Self {
        Self::new(
            NotificationKind::StudyCompleted,
            "Graduated!",
            format!("You earned: {}", name),
            None,
        )
    }

    pub fn job_changed(name: &str, salary: f64) -> Self {
        Self::new(
            NotificationKind::JobChanged,
            "New job",
            format!("You are now: {} ({}/tick)", name, format_money(salary)),
            Some(salary),
        )
    }

    pub fn achievement_unlocked(name: &str, reward: f64) -> Self {
        Self::new(
            NotificationKind::AchievementUnlocked,
            "Achievement unlocked",
            format!("{} (+{})", name, format_money(reward)),
            Some(reward),
        )
    }

    pub fn studying(remaining_secs: u64) -> Self {
        Self::new(
            NotificationKind::Studying,
            "You're studying!",
            format!(
                "Finish studying to keep earning ({}s left)",
                remaining_secs
            ),
            None,
        )
    }

    pub fn rejected(name: &str, reason: Rejection) -> Self {
        Self::new(
            NotificationKind::Rejected,
            "Can't buy that",
            format!("{}: {}", name, reason),
            None,
        )
    }

    /// Highlighted in the log.
    pub fn is_important(&self) -> bool {
        matches!(
            self.kind,
            NotificationKind::StudyCompleted
                | NotificationKind::AchievementUnlocked
                | NotificationKind::InsufficientFunds
        )
    }

    /// Single-line form for the log panel.
    pub fn line(&self) -> String {
        format!("{}: {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_carries_cost() {
        let n = Notification::purchased("Cardboard Box", 10.0);
        assert_eq!(n.kind, NotificationKind::Purchased);
        assert_eq!(n.amount, Some(10.0));
        assert!(n.description.contains("$10"));
        assert!(!n.is_important());
    }

    #[test]
    fn insufficient_funds_mentions_both_amounts() {
        let n = Notification::insufficient_funds("Penthouse", 500_000.0, 1_234.0);
        assert!(n.description.contains("$500,000"));
        assert!(n.description.contains("$1,234"));
        assert!(n.is_important());
    }

    #[test]
    fn achievement_is_important() {
        let n = Notification::achievement_unlocked("First Step", 50.0);
        assert!(n.is_important());
        assert_eq!(n.line(), "Achievement unlocked: First Step (+$50)");
    }

    #[test]
    fn rejection_uses_reason_text() {
        let n = Notification::rejected("CFO", Rejection::Underqualified);
        assert_eq!(n.kind, NotificationKind::Rejected);
        assert_eq!(n.line(), "Can't buy that: CFO: education requirement not met");
        assert!(!n.is_important());
    }

    #[test]
    fn studying_has_no_amount() {
        let n = Notification::studying(7);
        assert_eq!(n.amount, None);
        assert!(n.description.contains("7s"));
    }
}
