//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | Code | Meaning |
//! |---|---|
//! | 0 | success |
//! | 2 | configuration error |
//! | 3 | validation error, unknown record or rejected credentials |
//! | 4 | row store unavailable |
//! | 5 | any other failure |

pub mod approve;
pub mod init;
pub mod lock;
pub mod queue;
pub mod receive;
pub mod search;
pub mod status;
pub mod submit;
pub mod summary;
pub mod validate;

use crate::adapters::factory::Adapters;
use crate::adapters::identity::attribution;
use crate::config::{load_config, ReqflowConfig};
use crate::domain::{ReqflowError, Requisition};
use crate::log_error_with_context;
use chrono::NaiveDate;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_VALIDATION: i32 = 3;
pub const EXIT_STORE_UNAVAILABLE: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error
pub fn exit_code(error: &ReqflowError) -> i32 {
    match error {
        ReqflowError::Configuration(_) => EXIT_CONFIG,
        ReqflowError::Validation(_)
        | ReqflowError::RecordNotFound(_)
        | ReqflowError::Authentication(_) => EXIT_VALIDATION,
        ReqflowError::StoreUnavailable(_) => EXIT_STORE_UNAVAILABLE,
        _ => EXIT_FATAL,
    }
}

/// Print a failure and return its exit code
pub(crate) fn fail(action: &str, error: &ReqflowError) -> i32 {
    log_error_with_context!(error, action);
    println!("❌ {action}");
    println!("   Error: {error}");
    exit_code(error)
}

/// Load configuration and build adapters, printing any failure
pub(crate) fn connect(config_path: &str) -> Result<(ReqflowConfig, Adapters), i32> {
    let config = load_config(config_path).map_err(|e| {
        println!("❌ Failed to load configuration file");
        println!("   Error: {e}");
        EXIT_CONFIG
    })?;
    let adapters = Adapters::from_config(&config)
        .map_err(|e| fail("Failed to create row store clients", &e))?;
    Ok((config, adapters))
}

/// Display name for `account`, empty when it cannot be resolved
pub(crate) async fn actor_name(adapters: &Adapters, account: &str) -> String {
    attribution(adapters.identity.as_ref(), account).await.name
}

/// Today's local date
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Print records as a table
pub(crate) fn print_records(records: &[Requisition]) {
    println!(
        "{:<14} {:<10} {:<16} {:<14} {:<24} {:>8} {:<10} {:<10} {:<9}",
        "Requisition", "Date", "Department", "Applicant", "Item", "Qty", "Approval", "Receipt",
        "Lock"
    );
    println!("{}", "-".repeat(125));
    for record in records {
        println!(
            "{:<14} {:<10} {:<16} {:<14} {:<24} {:>8} {:<10} {:<10} {:<9}",
            record.key_str(),
            record.created_date,
            record.department,
            record.applicant,
            record.item_name,
            record.quantity,
            record.approval_status,
            record.receipt_status,
            record.edit_lock.unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RowStoreError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&ReqflowError::Configuration("x".into())), 2);
        assert_eq!(exit_code(&ReqflowError::RecordNotFound("x".into())), 3);
        assert_eq!(exit_code(&ReqflowError::Authentication("x".into())), 3);
        assert_eq!(
            exit_code(&RowStoreError::Timeout("x".into()).into()),
            4
        );
        assert_eq!(exit_code(&ReqflowError::Io("x".into())), 5);
    }
}
