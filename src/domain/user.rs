//! User attribution
//!
//! Users live in a separate account sheet owned by the identity provider.
//! The core only consumes them to stamp actor names and mail addresses.

use serde::{Deserialize, Serialize};

/// Attribution details for one account
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInfo {
    /// Login account
    pub account: String,

    /// Display name written into actor columns
    pub name: String,

    /// Mail address
    pub mail: String,

    /// Role label, e.g. "staff" or "manager"
    pub role: String,
}

impl UserInfo {
    /// Attribution used when the account cannot be resolved
    ///
    /// All fields are empty. A missing user never blocks a workflow operation.
    pub fn anonymous(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            ..Self::default()
        }
    }

    /// Whether the lookup produced a name
    pub fn is_resolved(&self) -> bool {
        !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_empty_attribution() {
        let user = UserInfo::anonymous("jdoe");
        assert_eq!(user.account, "jdoe");
        assert!(user.name.is_empty());
        assert!(user.mail.is_empty());
        assert!(!user.is_resolved());
    }
}
