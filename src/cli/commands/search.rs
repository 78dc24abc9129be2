//! Search command implementation

use super::{connect, fail, print_records};
use crate::core::query::{CompositeFilter, QueryEngine, SearchQuery};
use crate::domain::{ApprovalStatus, ReqflowError};
use clap::{Args, ValueEnum};

/// Search mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchMode {
    /// Business-key substring
    Key,
    /// Business-key range
    Range,
    /// Creation-date range
    Date,
    /// Exact department
    Department,
    /// Applicant substring
    Applicant,
    /// Approval status
    Approval,
    /// Receipt-approval status
    ReceiptApproval,
    /// Every given criterion at once
    Composite,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search mode
    #[arg(long, value_enum, default_value_t = SearchMode::Composite)]
    pub mode: SearchMode,

    /// Text to look for (key, department, applicant or approval modes)
    #[arg(long, short)]
    pub query: Option<String>,

    /// Business-key substring
    #[arg(long)]
    pub key: Option<String>,

    /// Department
    #[arg(long)]
    pub department: Option<String>,

    /// Applicant
    #[arg(long)]
    pub applicant: Option<String>,

    /// Approval or receipt-approval status
    #[arg(long)]
    pub status: Option<ApprovalStatus>,

    /// Lower bound (business key or date, depending on mode)
    #[arg(long)]
    pub from: Option<String>,

    /// Upper bound (business key or date, depending on mode)
    #[arg(long)]
    pub to: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn text(&self) -> Result<String, ReqflowError> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ReqflowError::Validation("This mode needs --query".to_string()))
    }

    /// Build the query for the chosen mode
    ///
    /// # Errors
    ///
    /// Returns a validation error when the mode's inputs are missing.
    pub fn to_query(&self) -> Result<SearchQuery, ReqflowError> {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();
        let query = match self.mode {
            SearchMode::Key => SearchQuery::BusinessKey { query: self.text()? },
            SearchMode::Range => SearchQuery::KeyRange {
                from: self.from.clone(),
                to: self.to.clone(),
            },
            SearchMode::Date => SearchQuery::DateRange {
                from: optional(&self.from),
                to: optional(&self.to),
            },
            SearchMode::Department => SearchQuery::Department { query: self.text()? },
            SearchMode::Applicant => SearchQuery::Applicant { query: self.text()? },
            SearchMode::Approval => match (&self.query, self.status) {
                (Some(_), _) => SearchQuery::ApprovalStatus { query: self.text()? },
                (None, Some(status)) => SearchQuery::ApprovalStatus {
                    query: status.as_str().to_string(),
                },
                (None, None) => {
                    return Err(ReqflowError::Validation(
                        "Approval search needs --query or --status".to_string(),
                    ))
                }
            },
            SearchMode::ReceiptApproval => SearchQuery::ReceiptApproval {
                status: self.status.ok_or_else(|| {
                    ReqflowError::Validation("Receipt approval search needs --status".to_string())
                })?,
            },
            SearchMode::Composite => SearchQuery::Composite(CompositeFilter {
                business_key: optional(&self.key),
                department: optional(&self.department),
                applicant: optional(&self.applicant),
                approval_status: self.status,
                date_from: optional(&self.from),
                date_to: optional(&self.to),
            }),
        };
        query.validate()?;
        Ok(query)
    }

    /// Execute the search command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let query = match self.to_query() {
            Ok(query) => query,
            Err(e) => return Ok(fail("Invalid search", &e)),
        };
        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let engine = QueryEngine::new(adapters.requisitions.clone(), config.schema.max_columns);

        let found = match engine.search(&query).await {
            Ok(found) => found,
            Err(e) => return Ok(fail("Search failed", &e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&found)?);
            return Ok(0);
        }

        println!("🔍 {} requisition(s) found", found.len());
        println!();
        if !found.is_empty() {
            print_records(&found);
            println!();
        }
        Ok(0)
    }
}
