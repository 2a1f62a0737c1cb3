use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Session-lifetime copy of the server's category list, shared through a
/// context so every category `<select>` reads the same fetch.
#[derive(Clone, PartialEq, Default)]
pub struct CategoryCache(pub Rc<Vec<Category>>);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
}

/// A null or missing wire amount decodes as zero.
fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or(0.0))
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct DashboardData {
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub balance: f64,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub total_income: f64,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub total_expense: f64,
    pub recent_transactions: Vec<Transaction>,
    pub category_spending: Vec<CategorySpending>,
}

/// One row of `GET /api/budgets/summary`; the server joins the category and
/// computes spent/remaining for the requested month.
#[derive(Clone, PartialEq, Deserialize)]
pub struct BudgetSummary {
    pub budget_id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub budgeted_amount: f64,
    pub spent_amount: f64,
    pub remaining_amount: f64,
    pub budget_month: String,
}

impl BudgetSummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining_amount < 0.0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    fn plural_unit(&self) -> &'static str {
        match self {
            Self::Daily => "days",
            Self::Weekly => "weeks",
            Self::Monthly => "months",
            Self::Yearly => "years",
        }
    }
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct RecurringTransaction {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub next_due_date: NaiveDate,
    pub is_active: bool,
}

impl RecurringTransaction {
    /// "Monthly", "Every 2 weeks", ...
    pub fn schedule_label(&self) -> String {
        if self.interval <= 1 {
            match self.frequency {
                Frequency::Daily => "Daily".to_string(),
                Frequency::Weekly => "Weekly".to_string(),
                Frequency::Monthly => "Monthly".to_string(),
                Frequency::Yearly => "Yearly".to_string(),
            }
        } else {
            format!("Every {} {}", self.interval, self.frequency.plural_unit())
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
}

impl SavingsGoal {
    /// Progress toward the target in percent, clamped to 100.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).min(100.0)
    }

    pub fn is_achieved(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }
}

/// Raw values of the transaction filter bar; empty string means "not set",
/// mirroring the `<select>`/`<input>` values they come from.
#[derive(Clone, PartialEq, Default)]
pub struct TransactionFilter {
    pub transaction_type: String,
    pub category_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl TransactionFilter {
    /// Query parameters for `GET /api/transactions`; unset fields are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.transaction_type.is_empty() {
            pairs.push(("type", self.transaction_type.clone()));
        }
        if !self.category_id.is_empty() {
            pairs.push(("category_id", self.category_id.clone()));
        }
        if !self.start_date.is_empty() {
            pairs.push(("start_date", self.start_date.clone()));
        }
        if !self.end_date.is_empty() {
            pairs.push(("end_date", self.end_date.clone()));
        }
        pairs
    }
}

// The backend seeds "Salary" as the only income category and "Other" as the
// catch-all usable for both directions; every other seeded category is
// expense-only.
const INCOME_CATEGORY_NAMES: [&str; 1] = ["Salary"];
const GENERAL_CATEGORY_NAMES: [&str; 1] = ["Other"];

/// Categories offered for the given transaction type. No type selected means
/// no restriction.
pub fn eligible_categories(
    categories: &[Category],
    transaction_type: Option<TransactionType>,
) -> Vec<Category> {
    match transaction_type {
        Some(TransactionType::Income) => categories
            .iter()
            .filter(|c| {
                INCOME_CATEGORY_NAMES.contains(&c.name.as_str())
                    || GENERAL_CATEGORY_NAMES.contains(&c.name.as_str())
            })
            .cloned()
            .collect(),
        Some(TransactionType::Expense) => categories
            .iter()
            .filter(|c| !INCOME_CATEGORY_NAMES.contains(&c.name.as_str()))
            .cloned()
            .collect(),
        None => categories.to_vec(),
    }
}

/// Keep the previous category selection across a type change when it is
/// still offered, otherwise fall back to the placeholder.
pub fn retain_category_selection(offered: &[Category], selected: &str) -> String {
    if offered.iter().any(|c| c.id.to_string() == selected) {
        selected.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_currency;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    fn seeded_categories() -> Vec<Category> {
        vec![
            category(1, "Food"),
            category(2, "Bills"),
            category(3, "Entertainment"),
            category(4, "Transportation"),
            category(5, "Shopping"),
            category(6, "Healthcare"),
            category(7, "Salary"),
            category(8, "Other"),
        ]
    }

    #[test]
    fn test_income_offers_only_salary_and_other() {
        let offered = eligible_categories(&seeded_categories(), Some(TransactionType::Income));
        let names: Vec<&str> = offered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Other"]);
    }

    #[test]
    fn test_expense_excludes_salary() {
        let offered = eligible_categories(&seeded_categories(), Some(TransactionType::Expense));
        assert_eq!(offered.len(), 7);
        assert!(offered.iter().all(|c| c.name != "Salary"));
        assert!(offered.iter().any(|c| c.name == "Other"));
    }

    #[test]
    fn test_no_type_offers_everything() {
        let offered = eligible_categories(&seeded_categories(), None);
        assert_eq!(offered.len(), 8);
    }

    #[test]
    fn test_selection_survives_type_change_when_still_offered() {
        let offered = eligible_categories(&seeded_categories(), Some(TransactionType::Income));
        assert_eq!(retain_category_selection(&offered, "8"), "8");
    }

    #[test]
    fn test_selection_resets_when_filtered_out() {
        let offered = eligible_categories(&seeded_categories(), Some(TransactionType::Income));
        // Food is expense-only, so switching to income drops it.
        assert_eq!(retain_category_selection(&offered, "1"), "");
        assert_eq!(retain_category_selection(&offered, ""), "");
    }

    #[test]
    fn test_overspent_budget_is_flagged() {
        let row = BudgetSummary {
            budget_id: 1,
            category_id: 1,
            category_name: "Food".to_string(),
            budgeted_amount: 1000.0,
            spent_amount: 1200.0,
            remaining_amount: -200.0,
            budget_month: "2025-06".to_string(),
        };
        assert!(row.remaining_amount < 0.0);
        assert!(row.is_overspent());
    }

    #[test]
    fn test_budget_within_limit_is_not_flagged() {
        let row = BudgetSummary {
            budget_id: 1,
            category_id: 1,
            category_name: "Food".to_string(),
            budgeted_amount: 1000.0,
            spent_amount: 999.99,
            remaining_amount: 0.01,
            budget_month: "2025-06".to_string(),
        };
        assert!(!row.is_overspent());
    }

    fn goal(target: f64, current: f64) -> SavingsGoal {
        SavingsGoal {
            id: 1,
            name: "Emergency fund".to_string(),
            target_amount: target,
            current_amount: current,
            target_date: None,
            description: None,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn test_goal_reaching_target_is_achieved_at_100_percent() {
        let g = goal(500.0, 500.0);
        assert!(g.is_achieved());
        assert_eq!(format!("{:.1}", g.progress_percent()), "100.0");
    }

    #[test]
    fn test_goal_progress_clamps_above_target() {
        let g = goal(500.0, 800.0);
        assert!(g.is_achieved());
        assert_eq!(g.progress_percent(), 100.0);
    }

    #[test]
    fn test_goal_progress_partial() {
        let g = goal(400.0, 100.0);
        assert!(!g.is_achieved());
        assert_eq!(g.progress_percent(), 25.0);
    }

    #[test]
    fn test_zero_target_has_no_progress() {
        let g = goal(0.0, 50.0);
        assert!(!g.is_achieved());
        assert_eq!(g.progress_percent(), 0.0);
    }

    #[test]
    fn test_filter_query_pairs_skip_unset_fields() {
        let filter = TransactionFilter {
            transaction_type: "expense".to_string(),
            category_id: String::new(),
            start_date: "2025-06-01".to_string(),
            end_date: String::new(),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("type", "expense".to_string()),
                ("start_date", "2025-06-01".to_string()),
            ]
        );
        assert!(TransactionFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_schedule_label_singular_and_plural() {
        let mut rt = RecurringTransaction {
            id: 1,
            description: "Rent".to_string(),
            amount: 1200.0,
            transaction_type: TransactionType::Expense,
            category_id: None,
            category_name: None,
            frequency: Frequency::Monthly,
            interval: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
            next_due_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            is_active: true,
        };
        assert_eq!(rt.schedule_label(), "Monthly");
        rt.frequency = Frequency::Weekly;
        rt.interval = 2;
        assert_eq!(rt.schedule_label(), "Every 2 weeks");
    }

    #[test]
    fn test_transaction_wire_format_decodes() {
        let json = r#"{
            "id": 7,
            "amount": 250.5,
            "transaction_type": "expense",
            "category_id": null,
            "category_name": null,
            "date": "2025-06-14",
            "description": "Groceries",
            "user_id": 3,
            "created_at": "2025-06-14T10:00:00"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, 7);
        assert_eq!(tx.transaction_type, TransactionType::Expense);
        assert_eq!(tx.category_id, None);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
    }

    #[test]
    fn test_dashboard_null_and_missing_totals_decode_as_zero() {
        let json = r#"{
            "balance": null,
            "total_income": 1500.0,
            "recent_transactions": [],
            "category_spending": []
        }"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.balance, 0.0);
        assert_eq!(data.total_expense, 0.0);
        assert_eq!(data.total_income, 1500.0);
        assert_eq!(format_currency(data.balance), format_currency(0.0));
    }
}
