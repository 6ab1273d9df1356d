use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    /// One of the plan choices, or empty when none was selected.
    pub plan: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub const PLAN_CHOICES: [&str; 3] = ["starter", "professional", "enterprise"];

/// Unknown plan values are cleared rather than rejected.
pub fn normalize_plan(plan: &str) -> String {
    if PLAN_CHOICES.contains(&plan) {
        plan.to_string()
    } else {
        String::new()
    }
}
