//! Validated experiment schema name.
//!
//! Schema names are spliced directly into query text (identifiers cannot be
//! bound as parameters), so the splice is a trust boundary: the executor only
//! accepts this type, and values can only be built through `parse`, which
//! enforces identifier shape and the configured prefix. The registry adds a
//! membership check on top before handing a name to callers.

use crate::errors::AppError;

/// Maximum identifier length accepted (PostgreSQL truncates at 63 bytes).
const MAX_SCHEMA_LEN: usize = 63;

/// An experiment schema (tenant namespace) name that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaName(String);

impl SchemaName {
    /// Validates a raw schema name: lowercase identifier shape plus the
    /// configured prefix. Membership in the registry is checked separately.
    pub fn parse(raw: &str, prefix: &str) -> Result<Self, AppError> {
        if raw.is_empty() || raw.len() > MAX_SCHEMA_LEN {
            return Err(AppError::Validation(format!(
                "schema name must be 1-{} characters",
                MAX_SCHEMA_LEN
            )));
        }
        if !raw.starts_with(prefix) {
            return Err(AppError::Validation(format!(
                "schema name must start with '{}'",
                prefix
            )));
        }
        let mut chars = raw.chars();
        let first = chars.next().unwrap_or_default();
        if !first.is_ascii_lowercase() {
            return Err(AppError::Validation(
                "schema name must start with a lowercase letter".into(),
            ));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(AppError::Validation(
                "schema name may only contain [a-z0-9_]".into(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// The validated schema name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemaName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conventional_names() {
        assert!(SchemaName::parse("kdm_exp_1", "kdm").is_ok());
        assert!(SchemaName::parse("kdm", "kdm").is_ok());
        assert!(SchemaName::parse("kdm_arc_agi_002", "kdm").is_ok());
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(SchemaName::parse("zzz", "kdm").is_err());
        assert!(SchemaName::parse("public", "kdm").is_err());
        // Prefix match is case-sensitive.
        assert!(SchemaName::parse("KDM_EXP", "kdm").is_err());
    }

    #[test]
    fn rejects_injection_shapes() {
        assert!(SchemaName::parse("kdm; DROP TABLE x", "kdm").is_err());
        assert!(SchemaName::parse("kdm.\"x\"", "kdm").is_err());
        assert!(SchemaName::parse("kdm--", "kdm").is_err());
        assert!(SchemaName::parse("", "kdm").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = format!("kdm_{}", "a".repeat(70));
        assert!(SchemaName::parse(&long, "kdm").is_err());
    }
}
