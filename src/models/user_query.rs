// file: src/models/user_query.rs
// description: free-text request entered by the user

use crate::error::Result;
use crate::utils::Validator;
use std::fmt;

/// A user request that is known to contain something besides whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery(String);

impl UserQuery {
    pub fn parse(raw: &str) -> Result<Self> {
        Validator::validate_query(raw, "User query")?;
        Ok(Self(raw.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
