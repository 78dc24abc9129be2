//! Lock and unlock command implementations

use super::{connect, fail};
use crate::config::secret_string;
use crate::core::lock::{LockManager, UnlockTarget};
use crate::domain::ReqflowError;
use clap::Args;

/// Arguments for the lock command
#[derive(Args, Debug)]
pub struct LockArgs {
    /// Business key of the requisition
    pub business_key: String,
}

impl LockArgs {
    /// Execute the lock command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let manager = LockManager::new(
            adapters.requisitions.clone(),
            adapters.identity.clone(),
            adapters.protection.clone(),
            config.workflow.admin_account.clone(),
            config.schema.max_columns,
        );

        match manager.lock(&self.business_key).await {
            Ok(true) => {
                println!("🔒 {} is now read-only", self.business_key);
                Ok(0)
            }
            Ok(false) => {
                println!("🔒 {} was already read-only", self.business_key);
                Ok(0)
            }
            Err(e) => Ok(fail("Failed to lock requisition", &e)),
        }
    }
}

/// Arguments for the unlock command
#[derive(Args, Debug)]
pub struct UnlockArgs {
    /// Business key of the requisition to unlock
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub business_key: Option<String>,

    /// Unlock every read-only requisition
    #[arg(long)]
    pub all: bool,

    /// Admin password
    #[arg(long, env = "REQFLOW_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl UnlockArgs {
    fn target(&self) -> Result<UnlockTarget, ReqflowError> {
        match (&self.business_key, self.all) {
            (_, true) => Ok(UnlockTarget::All),
            (Some(key), false) if !key.trim().is_empty() => Ok(UnlockTarget::One(key.clone())),
            _ => Err(ReqflowError::Validation(
                "Give a business key or --all".to_string(),
            )),
        }
    }

    /// Execute the unlock command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let target = match self.target() {
            Ok(target) => target,
            Err(e) => return Ok(fail("Unlock rejected", &e)),
        };
        let (config, adapters) = match connect(config_path) {
            Ok(connected) => connected,
            Err(code) => return Ok(code),
        };
        let manager = LockManager::new(
            adapters.requisitions.clone(),
            adapters.identity.clone(),
            adapters.protection.clone(),
            config.workflow.admin_account.clone(),
            config.schema.max_columns,
        );

        let credential = secret_string(self.password.clone());
        match manager.unlock(&target, &credential).await {
            Ok(count) => {
                println!("🔓 Unlocked {count} requisition(s)");
                Ok(0)
            }
            Err(e) => Ok(fail("Failed to unlock", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_target() {
        let args = UnlockArgs {
            business_key: None,
            all: true,
            password: "pw".to_string(),
        };
        assert_eq!(args.target().unwrap(), UnlockTarget::All);

        let args = UnlockArgs {
            business_key: Some("20250718-001".to_string()),
            all: false,
            password: "pw".to_string(),
        };
        assert_eq!(
            args.target().unwrap(),
            UnlockTarget::One("20250718-001".to_string())
        );

        let args = UnlockArgs {
            business_key: Some(" ".to_string()),
            all: false,
            password: "pw".to_string(),
        };
        assert!(args.target().is_err());
    }
}
