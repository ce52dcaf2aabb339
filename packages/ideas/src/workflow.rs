// ABOUTME: Status rules for the idea workflow
// ABOUTME: Triage on creation, stage transitions and truthy flag coercion

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::storage::FieldUpdate;
use crate::types::IdeaStatus;

/// Minimum number of impacted users for an idea to pass triage
pub const TRIAGE_THRESHOLD: f64 = 100.0;

/// Initial status of a newly created idea.
///
/// A missing user count never passes triage. `Created` is only the column
/// default and is never produced here.
pub fn triage(impacted_users: Option<f64>) -> IdeaStatus {
    match impacted_users {
        Some(users) if users >= TRIAGE_THRESHOLD => IdeaStatus::Valid,
        _ => IdeaStatus::Archived,
    }
}

/// A flag decoded from any JSON value using JavaScript truthiness.
///
/// `null`, `false`, `0` and `""` are false; so is a missing field when used
/// with `#[serde(default)]`. Everything else, including `"false"`, `[]` and
/// `{}`, is true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Truthy(pub bool);

impl Truthy {
    pub fn get(self) -> bool {
        self.0
    }
}

impl From<bool> for Truthy {
    fn from(value: bool) -> Self {
        Truthy(value)
    }
}

impl<'de> Deserialize<'de> for Truthy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Truthy(is_truthy(&value)))
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One workflow step applied to an existing idea.
///
/// Transitions are unconditional: the prior status is never consulted, so
/// any step may follow any other.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Evaluate {
        evaluator_comments: Option<String>,
        approved: bool,
    },
    AllocateBudget {
        budget: Option<f64>,
        leadership_approval: bool,
    },
    Estimate {
        dev_effort_estimate: Option<String>,
    },
    Schedule {
        start_date: Option<String>,
        end_date: Option<String>,
    },
    GoLive,
}

impl Transition {
    /// Status written by this step
    pub fn status(&self) -> IdeaStatus {
        match self {
            Transition::Evaluate { approved: true, .. } => IdeaStatus::Evaluated,
            Transition::AllocateBudget {
                leadership_approval: true,
                ..
            } => IdeaStatus::Budgeted,
            Transition::Evaluate { .. } | Transition::AllocateBudget { .. } => {
                IdeaStatus::Archived
            }
            Transition::Estimate { .. } => IdeaStatus::InDevelopment,
            Transition::Schedule { .. } => IdeaStatus::Scheduled,
            Transition::GoLive => IdeaStatus::Live,
        }
    }

    /// Message reported to the caller after the step is written
    pub fn message(&self) -> &'static str {
        match self {
            Transition::Evaluate { .. } => "Idea evaluated",
            Transition::AllocateBudget { .. } => "Budget allocated",
            Transition::Estimate { .. } => "Estimation added",
            Transition::Schedule { .. } => "Scheduled",
            Transition::GoLive => "Live",
        }
    }

    /// Columns written by this step, status last
    pub fn into_updates(self) -> Vec<FieldUpdate> {
        let status = self.status();
        let mut updates = match self {
            Transition::Evaluate {
                evaluator_comments, ..
            } => vec![FieldUpdate::EvaluatorComments(evaluator_comments)],
            Transition::AllocateBudget {
                budget,
                leadership_approval,
            } => vec![
                FieldUpdate::Budget(budget),
                FieldUpdate::LeadershipApproval(leadership_approval),
            ],
            Transition::Estimate {
                dev_effort_estimate,
            } => vec![FieldUpdate::DevEffortEstimate(dev_effort_estimate)],
            Transition::Schedule {
                start_date,
                end_date,
            } => vec![
                FieldUpdate::StartDate(start_date),
                FieldUpdate::EndDate(end_date),
            ],
            Transition::GoLive => Vec::new(),
        };
        updates.push(FieldUpdate::Status(status));
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Some(100.0), IdeaStatus::Valid)]
    #[case(Some(100.5), IdeaStatus::Valid)]
    #[case(Some(5000.0), IdeaStatus::Valid)]
    #[case(Some(99.9), IdeaStatus::Archived)]
    #[case(Some(0.0), IdeaStatus::Archived)]
    #[case(Some(-3.0), IdeaStatus::Archived)]
    #[case(None, IdeaStatus::Archived)]
    fn test_triage(#[case] users: Option<f64>, #[case] expected: IdeaStatus) {
        assert_eq!(triage(users), expected);
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(null), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(1), true)]
    #[case(json!(-1), true)]
    #[case(json!(""), false)]
    #[case(json!("false"), true)]
    #[case(json!("0"), true)]
    #[case(json!([]), true)]
    #[case(json!({}), true)]
    fn test_truthy_values(#[case] value: Value, #[case] expected: bool) {
        let flag: Truthy = serde_json::from_value(value).unwrap();
        assert_eq!(flag.get(), expected);
    }

    #[test]
    fn test_missing_flag_defaults_to_false() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default)]
            approved: Truthy,
        }

        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(!body.approved.get());
    }

    #[test]
    fn test_evaluate_status() {
        let approved = Transition::Evaluate {
            evaluator_comments: Some("Worth it".to_string()),
            approved: true,
        };
        let rejected = Transition::Evaluate {
            evaluator_comments: None,
            approved: false,
        };
        assert_eq!(approved.status(), IdeaStatus::Evaluated);
        assert_eq!(rejected.status(), IdeaStatus::Archived);
    }

    #[test]
    fn test_budget_rejection_still_writes_budget() {
        let transition = Transition::AllocateBudget {
            budget: Some(12_500.0),
            leadership_approval: false,
        };
        assert_eq!(transition.status(), IdeaStatus::Archived);
        assert_eq!(
            transition.into_updates(),
            vec![
                FieldUpdate::Budget(Some(12_500.0)),
                FieldUpdate::LeadershipApproval(false),
                FieldUpdate::Status(IdeaStatus::Archived),
            ]
        );
    }

    #[test]
    fn test_unconditional_steps() {
        let estimate = Transition::Estimate {
            dev_effort_estimate: Some("3 sprints".to_string()),
        };
        let schedule = Transition::Schedule {
            start_date: Some("2025-01-06".to_string()),
            end_date: None,
        };
        assert_eq!(estimate.status(), IdeaStatus::InDevelopment);
        assert_eq!(schedule.status(), IdeaStatus::Scheduled);
        assert_eq!(Transition::GoLive.status(), IdeaStatus::Live);
    }

    #[test]
    fn test_go_live_only_writes_status() {
        assert_eq!(
            Transition::GoLive.into_updates(),
            vec![FieldUpdate::Status(IdeaStatus::Live)]
        );
        assert_eq!(Transition::GoLive.message(), "Live");
    }
}
