//! Search modes
//!
//! Each mode filters a full record set and keeps sheet order. Modes are
//! mutually exclusive; [`CompositeFilter`] is the one that combines
//! criteria.

use crate::domain::ids::COMPACT_DATE_FORMAT;
use crate::domain::{ApprovalStatus, ReqflowError, Requisition, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Parse `YYYYMMDD`, `YYYY-MM-DD` or `YYYY/MM/DD`
///
/// # Examples
///
/// ```
/// use reqflow::core::query::parse_date;
///
/// assert_eq!(parse_date("2025-07-18"), parse_date("20250718"));
/// assert!(parse_date("2025-7-18").is_none());
/// assert!(parse_date("").is_none());
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let compact: String = raw.trim().chars().filter(|c| !matches!(c, '-' | '/')).collect();
    if compact.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(&compact, COMPACT_DATE_FORMAT).ok()
}

fn parse_bound(raw: &str, name: &str) -> Result<NaiveDate> {
    parse_date(raw).ok_or_else(|| {
        ReqflowError::Validation(format!(
            "Invalid {name} date '{}': expected YYYYMMDD or YYYY-MM-DD",
            raw.trim()
        ))
    })
}

fn numeric_key(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '/' | '_' | '.') && !c.is_whitespace())
        .collect();
    digits.parse().ok()
}

/// Whether `key` lies within the inclusive bounds
///
/// Keys and bounds are compared as integers once separators are removed.
/// If any present value fails to parse, all of them are compared as
/// strings instead. A missing bound leaves that side open.
pub fn key_in_range(key: &str, from: Option<&str>, to: Option<&str>) -> bool {
    let key = key.trim();
    let from = from.map(str::trim).filter(|b| !b.is_empty());
    let to = to.map(str::trim).filter(|b| !b.is_empty());

    let key_number = numeric_key(key);
    let numeric = key_number.is_some()
        && from.map_or(true, |b| numeric_key(b).is_some())
        && to.map_or(true, |b| numeric_key(b).is_some());
    let cmp = |bound: &str| match (numeric, key_number, numeric_key(bound)) {
        (true, Some(k), Some(b)) => k.cmp(&b),
        _ => key.cmp(bound),
    };

    from.map_or(true, |bound| cmp(bound) != Ordering::Less)
        && to.map_or(true, |bound| cmp(bound) != Ordering::Greater)
}

/// Loose approval-status match
///
/// Equality or containment in either direction, case-insensitive. A blank
/// stored status only matches a query meaning "pending".
pub fn approval_text_matches(stored: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return false;
    }
    let stored = stored.trim().to_lowercase();
    let wanted = ApprovalStatus::from_alias(&query);
    if stored.is_empty() {
        return wanted == Some(ApprovalStatus::Pending);
    }
    stored == query || stored.contains(&query) || query.contains(&stored)
}

fn date_in_range(raw: &str, from: NaiveDate, to: NaiveDate) -> bool {
    parse_date(raw).is_some_and(|date| date >= from && date <= to)
}

/// Criteria combined with AND; blank criteria are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeFilter {
    /// Business-key substring
    #[serde(default)]
    pub business_key: String,
    /// Exact department
    #[serde(default)]
    pub department: String,
    /// Applicant substring
    #[serde(default)]
    pub applicant: String,
    /// Canonical approval status
    #[serde(default)]
    pub approval_status: Option<ApprovalStatus>,
    /// Lower creation-date bound, used only together with `date_to`
    #[serde(default)]
    pub date_from: String,
    /// Upper creation-date bound, used only together with `date_from`
    #[serde(default)]
    pub date_to: String,
}

impl CompositeFilter {
    fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        if self.date_from.trim().is_empty() || self.date_to.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some((
            parse_bound(&self.date_from, "start")?,
            parse_bound(&self.date_to, "end")?,
        )))
    }

    fn matches(&self, record: &Requisition, dates: Option<(NaiveDate, NaiveDate)>) -> bool {
        let key = self.business_key.trim();
        let department = self.department.trim();
        let applicant = self.applicant.trim();

        (key.is_empty() || record.key_str().contains(key))
            && (department.is_empty() || record.department.trim() == department)
            && (applicant.is_empty() || record.applicant.contains(applicant))
            && self
                .approval_status
                .map_or(true, |status| record.approval_status == status)
            && dates.map_or(true, |(from, to)| {
                date_in_range(&record.created_date, from, to)
            })
    }
}

/// One search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchQuery {
    /// Business-key substring
    BusinessKey { query: String },
    /// Inclusive business-key range; a missing bound is open
    KeyRange {
        from: Option<String>,
        to: Option<String>,
    },
    /// Inclusive creation-date range; both bounds required
    DateRange { from: String, to: String },
    /// Exact department
    Department { query: String },
    /// Applicant substring
    Applicant { query: String },
    /// Loose approval-status match
    ApprovalStatus { query: String },
    /// Receipt-approval status, explicit when stored, otherwise inferred
    ReceiptApproval { status: ApprovalStatus },
    /// AND of several criteria
    Composite(CompositeFilter),
}

impl SearchQuery {
    /// Check the query before any store call
    ///
    /// # Errors
    ///
    /// Returns a validation error for a date range missing a bound or
    /// carrying an unparsable bound.
    pub fn validate(&self) -> Result<()> {
        match self {
            SearchQuery::DateRange { from, to } => {
                if from.trim().is_empty() || to.trim().is_empty() {
                    return Err(ReqflowError::Validation(
                        "A date range needs both a start and an end date".to_string(),
                    ));
                }
                parse_bound(from, "start")?;
                parse_bound(to, "end")?;
                Ok(())
            }
            SearchQuery::Composite(filter) => filter.date_bounds().map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Filter `records`, keeping their order
    ///
    /// Blank text queries match nothing.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`SearchQuery::validate`].
    pub fn apply(&self, records: &[Requisition]) -> Result<Vec<Requisition>> {
        self.validate()?;
        let keep = |predicate: &dyn Fn(&Requisition) -> bool| {
            records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect::<Vec<_>>()
        };

        let matched = match self {
            SearchQuery::BusinessKey { query } => {
                let query = query.trim();
                if query.is_empty() {
                    Vec::new()
                } else {
                    keep(&|r| r.key_str().contains(query))
                }
            }
            SearchQuery::KeyRange { from, to } => keep(&|r| {
                r.business_key.is_some()
                    && key_in_range(r.key_str(), from.as_deref(), to.as_deref())
            }),
            SearchQuery::DateRange { from, to } => {
                let from = parse_bound(from, "start")?;
                let to = parse_bound(to, "end")?;
                keep(&|r| date_in_range(&r.created_date, from, to))
            }
            SearchQuery::Department { query } => {
                let query = query.trim();
                if query.is_empty() {
                    Vec::new()
                } else {
                    keep(&|r| r.department.trim() == query)
                }
            }
            SearchQuery::Applicant { query } => {
                let query = query.trim();
                if query.is_empty() {
                    Vec::new()
                } else {
                    keep(&|r| r.applicant.contains(query))
                }
            }
            SearchQuery::ApprovalStatus { query } => {
                keep(&|r| approval_text_matches(&r.approval_status_text, query))
            }
            SearchQuery::ReceiptApproval { status } => {
                keep(&|r| r.receipt_approval_state() == *status)
            }
            SearchQuery::Composite(filter) => {
                let dates = filter.date_bounds()?;
                keep(&|r| filter.matches(r, dates))
            }
        };

        tracing::debug!(
            mode = self.mode(),
            total = records.len(),
            matched = matched.len(),
            "Search applied"
        );
        Ok(matched)
    }

    /// Mode name for logs
    pub fn mode(&self) -> &'static str {
        match self {
            SearchQuery::BusinessKey { .. } => "business_key",
            SearchQuery::KeyRange { .. } => "key_range",
            SearchQuery::DateRange { .. } => "date_range",
            SearchQuery::Department { .. } => "department",
            SearchQuery::Applicant { .. } => "applicant",
            SearchQuery::ApprovalStatus { .. } => "approval_status",
            SearchQuery::ReceiptApproval { .. } => "receipt_approval",
            SearchQuery::Composite(_) => "composite",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BusinessKey;
    use test_case::test_case;

    fn record(
        key: &str,
        date: &str,
        department: &str,
        applicant: &str,
        status: &str,
    ) -> Requisition {
        Requisition {
            business_key: BusinessKey::new(key).ok(),
            created_date: date.to_string(),
            department: department.to_string(),
            applicant: applicant.to_string(),
            approval_status: ApprovalStatus::from_alias(status).unwrap_or_default(),
            approval_status_text: status.to_string(),
            ..Requisition::default()
        }
    }

    fn records() -> Vec<Requisition> {
        vec![
            record("20250701-001", "20250701", "Manufacturing", "Lin Wei", "approved"),
            record("20250715-003", "2025-07-15", "R&D", "Chen Yu", "pending"),
            record("20250720-001", "20250720", "Manufacturing", "Wang Lin", ""),
            record("", "not a date", "QA", "Lin Wei", "Rejected by manager"),
        ]
    }

    fn keys(found: &[Requisition]) -> Vec<&str> {
        found.iter().map(Requisition::key_str).collect()
    }

    #[test_case("20250718", Some((2025, 7, 18)))]
    #[test_case("2025-07-18", Some((2025, 7, 18)))]
    #[test_case("2025/07/18", Some((2025, 7, 18)))]
    #[test_case("20250231", None)]
    #[test_case("2025718", None)]
    #[test_case("tomorrow", None)]
    fn test_parse_date(raw: &str, expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_date(raw), expected);
    }

    #[test]
    fn test_key_range_numeric() {
        let query = SearchQuery::KeyRange {
            from: Some("20250710-000".to_string()),
            to: Some("20250718-999".to_string()),
        };
        let found = query.apply(&records()).unwrap();
        assert_eq!(keys(&found), vec!["20250715-003"]);
    }

    #[test]
    fn test_key_range_open_side() {
        let query = SearchQuery::KeyRange {
            from: Some("20250715-003".to_string()),
            to: None,
        };
        assert_eq!(
            keys(&query.apply(&records()).unwrap()),
            vec!["20250715-003", "20250720-001"]
        );

        let unbounded = SearchQuery::KeyRange {
            from: Some(String::new()),
            to: None,
        };
        assert_eq!(unbounded.apply(&records()).unwrap().len(), 3);
    }

    #[test]
    fn test_key_range_lexical_fallback() {
        assert!(key_in_range("PO-B", Some("PO-A"), Some("PO-C")));
        assert!(!key_in_range("PO-D", Some("PO-A"), Some("PO-C")));
    }

    #[test]
    fn test_date_range_accepts_both_forms_and_skips_bad_dates() {
        let query = SearchQuery::DateRange {
            from: "2025-07-10".to_string(),
            to: "20250731".to_string(),
        };
        assert_eq!(
            keys(&query.apply(&records()).unwrap()),
            vec!["20250715-003", "20250720-001"]
        );
    }

    #[test]
    fn test_date_range_requires_both_bounds() {
        let query = SearchQuery::DateRange {
            from: "20250710".to_string(),
            to: String::new(),
        };
        assert!(matches!(
            query.validate(),
            Err(ReqflowError::Validation(_))
        ));
    }

    #[test]
    fn test_department_is_exact_and_applicant_is_substring() {
        let department = SearchQuery::Department {
            query: "Manufacturing".to_string(),
        };
        assert_eq!(department.apply(&records()).unwrap().len(), 2);

        let partial = SearchQuery::Department {
            query: "Manu".to_string(),
        };
        assert!(partial.apply(&records()).unwrap().is_empty());

        let applicant = SearchQuery::Applicant {
            query: "Lin".to_string(),
        };
        assert_eq!(applicant.apply(&records()).unwrap().len(), 3);
    }

    #[test]
    fn test_blank_text_query_matches_nothing() {
        let query = SearchQuery::BusinessKey {
            query: " ".to_string(),
        };
        assert!(query.apply(&records()).unwrap().is_empty());
    }

    #[test_case("approved", "approved", true)]
    #[test_case("Approved", "approve", true)]
    #[test_case("Rejected by manager", "rejected", true)]
    #[test_case("ok", "approved", false)]
    #[test_case("awaiting approval", "pending", false)]
    #[test_case("", "pending", true)]
    #[test_case("", "approved", false)]
    #[test_case("pending", "approved", false)]
    #[test_case("approved", "", false)]
    fn test_approval_loose_match(stored: &str, query: &str, expected: bool) {
        assert_eq!(approval_text_matches(stored, query), expected);
    }

    #[test]
    fn test_receipt_approval_mode_infers_from_columns() {
        let mut approved = record("20250701-001", "", "", "", "approved");
        approved.receipt_approver = "Lin".to_string();
        approved.receipt_approval_date = "20250721".to_string();
        let mut rejected = record("20250701-002", "", "", "", "approved");
        rejected.receipt_approver = "Lin".to_string();
        let pending = record("20250701-003", "", "", "", "approved");

        let all = vec![approved, rejected, pending];
        let find = |status| {
            SearchQuery::ReceiptApproval { status }
                .apply(&all)
                .unwrap()
                .iter()
                .map(|r| r.key_str().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(find(ApprovalStatus::Approved), vec!["20250701-001"]);
        assert_eq!(find(ApprovalStatus::Rejected), vec!["20250701-002"]);
        assert_eq!(find(ApprovalStatus::Pending), vec!["20250701-003"]);
    }

    #[test]
    fn test_composite_ands_criteria() {
        let filter = CompositeFilter {
            department: "Manufacturing".to_string(),
            applicant: "Lin".to_string(),
            approval_status: Some(ApprovalStatus::Pending),
            ..CompositeFilter::default()
        };
        let found = SearchQuery::Composite(filter).apply(&records()).unwrap();
        assert_eq!(keys(&found), vec!["20250720-001"]);
    }

    #[test]
    fn test_composite_date_needs_both_bounds() {
        let one_sided = CompositeFilter {
            date_from: "20250801".to_string(),
            ..CompositeFilter::default()
        };
        assert_eq!(
            SearchQuery::Composite(one_sided).apply(&records()).unwrap().len(),
            4
        );

        let bounded = CompositeFilter {
            date_from: "20250701".to_string(),
            date_to: "20250710".to_string(),
            ..CompositeFilter::default()
        };
        let found = SearchQuery::Composite(bounded).apply(&records()).unwrap();
        assert_eq!(keys(&found), vec!["20250701-001"]);
    }
}
