//! Domain models for Tally

use chrono::{Datelike, Local, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A spending category from the category registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// User-declared importance of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Raw (un-normalized) weight of this level
    pub fn weight(&self) -> f64 {
        match self {
            Self::High => 0.5,
            Self::Medium => 0.3,
            Self::Low => 0.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::str::FromStr for PriorityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!(
                "Unknown priority: {}. Priority must be 'high', 'medium', or 'low'",
                s
            )),
        }
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (user, category) priority declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub level: PriorityLevel,
}

/// One budgeting cycle: a calendar month of a given year
///
/// Serialized as `{"month": "October", "year": 2026}`. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "PeriodRepr", try_from = "PeriodRepr")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Years accepted from callers; dates in this range are stored as plain `YYYY-MM-DD`
    pub const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

    /// Create a period from a 1-based month number and a year
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !Self::YEARS.contains(&year) {
            return Err(Error::InvalidData(format!(
                "Year must be between {} and {}, got {}",
                Self::YEARS.start(),
                Self::YEARS.end(),
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current real-world month (local time)
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Parse a month given either as a number ("10") or a name ("October", "oct")
    pub fn parse(month: &str, year: i32) -> Result<Self> {
        let month = month.trim();
        if let Ok(number) = month.parse::<u32>() {
            return Self::new(number, year);
        }
        let parsed: Month = month
            .parse()
            .map_err(|_| Error::InvalidData(format!("Unknown month: {}", month)))?;
        Self::new(parsed.number_from_month(), year)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Full English month name, e.g. "October"
    pub fn month_name(&self) -> &'static str {
        Month::try_from(self.month as u8)
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    /// Label used to bucket income records, e.g. "2026-10"
    pub fn income_label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Linear month index: consecutive calendar months are consecutive integers
    pub fn index(&self) -> i32 {
        crate::budget::history::period_index(self.year, self.month)
    }

    /// First day of the period
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// The month after this one
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

#[derive(Serialize, Deserialize)]
struct PeriodRepr {
    month: String,
    year: i32,
}

impl From<Period> for PeriodRepr {
    fn from(p: Period) -> Self {
        Self {
            month: p.month_name().to_string(),
            year: p.year,
        }
    }
}

impl TryFrom<PeriodRepr> for Period {
    type Error = String;

    fn try_from(repr: PeriodRepr) -> std::result::Result<Self, Self::Error> {
        Period::parse(&repr.month, repr.year).map_err(|e| e.to_string())
    }
}

/// New expense to record in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub category_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    pub details: Option<String>,
    pub source: Option<String>,
}

/// An expense ledger row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    pub details: Option<String>,
    pub source: Option<String>,
}

/// An additional-income ledger row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    /// Period label ("YYYY-MM")
    pub month: String,
}

/// Summed expenses of one category within one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// One point of a category's monthly spending series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `year * 12 + month`
    pub period_index: i32,
    pub total: f64,
}

/// Candidate suggestion handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewSuggestion {
    pub category_id: i64,
    pub suggested_amount: f64,
}

/// A suggested spending ceiling for one category and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category_id: i64,
    pub category_name: String,
    pub suggested_amount: f64,
    pub period: Period,
}

/// Spending so far against a stored suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub category_id: i64,
    pub category_name: String,
    pub suggested_amount: f64,
    pub spent: f64,
    /// `suggested_amount - spent`; negative when over budget
    pub remaining: f64,
    /// Percent of the suggestion already spent (0 when the suggestion is 0)
    pub percent_used: f64,
}

impl BudgetProgress {
    pub fn new(suggestion: &Suggestion, spent: f64) -> Self {
        let percent_used = if suggestion.suggested_amount > 0.0 {
            spent / suggestion.suggested_amount * 100.0
        } else {
            0.0
        };
        Self {
            category_id: suggestion.category_id,
            category_name: suggestion.category_name.clone(),
            suggested_amount: suggestion.suggested_amount,
            spent,
            remaining: suggestion.suggested_amount - spent,
            percent_used,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_level_parse() {
        assert_eq!("high".parse::<PriorityLevel>().unwrap(), PriorityLevel::High);
        assert_eq!(" Medium ".parse::<PriorityLevel>().unwrap(), PriorityLevel::Medium);
        assert_eq!("LOW".parse::<PriorityLevel>().unwrap(), PriorityLevel::Low);
        assert!("urgent".parse::<PriorityLevel>().is_err());
    }

    #[test]
    fn test_priority_level_round_trip_str() {
        for level in [PriorityLevel::High, PriorityLevel::Medium, PriorityLevel::Low] {
            assert_eq!(level.as_str().parse::<PriorityLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_period_index_crosses_year_boundary() {
        let dec = Period::new(12, 2025).unwrap();
        let jan = Period::new(1, 2026).unwrap();
        assert_eq!(jan.index() - dec.index(), 1);
        assert_eq!(dec.next(), jan);
    }

    #[test]
    fn test_period_rejects_out_of_range_years() {
        assert!(Period::new(12, i32::MAX).is_err());
        assert!(Period::new(1, 0).is_err());
        assert!(Period::new(1, -2026).is_err());
        assert!(Period::parse("December", 10_000).is_err());

        let last = Period::new(12, 9999).unwrap();
        assert_eq!(last.next(), Period::from_date(NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap()));
        assert_eq!(last.next().index() - last.index(), 1);
        assert_eq!(Period::new(1, 1).unwrap().first_day(), NaiveDate::from_ymd_opt(1, 1, 1).unwrap());
    }

    #[test]
    fn test_period_parse() {
        let p = Period::parse("October", 2026).unwrap();
        assert_eq!(p.month(), 10);
        assert_eq!(Period::parse("oct", 2026).unwrap(), p);
        assert_eq!(Period::parse("10", 2026).unwrap(), p);
        assert!(Period::parse("13", 2026).is_err());
        assert!(Period::parse("Smarch", 2026).is_err());
    }

    #[test]
    fn test_period_labels() {
        let p = Period::new(3, 2025).unwrap();
        assert_eq!(p.month_name(), "March");
        assert_eq!(p.income_label(), "2025-03");
        assert_eq!(p.to_string(), "March 2025");
        assert_eq!(p.first_day(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_period_serde() {
        let p = Period::new(10, 2026).unwrap();
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json, serde_json::json!({"month": "October", "year": 2026}));

        let back: Period = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);

        let bad: std::result::Result<Period, _> =
            serde_json::from_value(serde_json::json!({"month": "Nope", "year": 2026}));
        assert!(bad.is_err());
    }

    #[test]
    fn test_budget_progress() {
        let s = Suggestion {
            category_id: 1,
            category_name: "Food".into(),
            suggested_amount: 200.0,
            period: Period::new(1, 2026).unwrap(),
        };
        let p = BudgetProgress::new(&s, 250.0);
        assert_eq!(p.remaining, -50.0);
        assert_eq!(p.percent_used, 125.0);
        assert!(p.is_over_budget());

        let zero = Suggestion {
            suggested_amount: 0.0,
            ..s
        };
        assert_eq!(BudgetProgress::new(&zero, 10.0).percent_used, 0.0);
    }
}
