//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod brand;

pub use audit::{handle_audit_command, AuditCommands};
pub use brand::{handle_brand_command, BrandCommands};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;

use crate::error::{RegistryError, RegistryResult};
use crate::models::{Actor, AuditContext, UserId};

/// Who is performing mutations, and from where
#[derive(Debug, Clone, Default, Args)]
pub struct IdentityArgs {
    /// Acting user ID
    #[arg(long, env = "BRAND_REGISTRY_USER_ID", global = true)]
    pub user_id: Option<UserId>,

    /// Acting user email
    #[arg(long, env = "BRAND_REGISTRY_USER_EMAIL", global = true)]
    pub user_email: Option<String>,

    /// Client IP recorded on audit records
    #[arg(long, env = "BRAND_REGISTRY_CLIENT_IP", global = true)]
    pub client_ip: Option<String>,
}

impl IdentityArgs {
    /// Build the audit context for a mutation
    pub fn context(&self) -> RegistryResult<AuditContext> {
        let (user_id, email) = match (self.user_id, self.user_email.as_deref()) {
            (Some(id), Some(email)) if !email.trim().is_empty() => (id, email.trim()),
            _ => {
                return Err(RegistryError::Validation(
                    "An acting user is required: set --user-id and --user-email".into(),
                ))
            }
        };

        let mut ctx = AuditContext::new(Actor::new(user_id, email))
            .with_user_agent(concat!("brandreg/", env!("CARGO_PKG_VERSION")));
        if let Some(ip) = &self.client_ip {
            ctx = ctx.with_ip(ip.clone());
        }
        Ok(ctx)
    }
}

/// Pagination flags shared by list commands
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PageArgs {
    /// Number of entries to skip
    #[arg(long, default_value_t = 0)]
    pub skip: usize,

    /// Maximum number of entries to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date
///
/// A bare date is taken as the start of the day, or its last instant when
/// `end_of_day` is set.
pub fn parse_timestamp(s: &str, end_of_day: bool) -> RegistryResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        RegistryError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp",
            s
        ))
    })?;

    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| RegistryError::Validation(format!("Invalid date '{}'", s)))?;

    Ok(Utc.from_utc_datetime(&date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_context_requires_user() {
        let args = IdentityArgs::default();
        assert!(args.context().unwrap_err().is_validation());

        let args = IdentityArgs {
            user_id: Some(UserId::new(1)),
            user_email: Some("  ".into()),
            client_ip: None,
        };
        assert!(args.context().unwrap_err().is_validation());
    }

    #[test]
    fn test_context() {
        let args = IdentityArgs {
            user_id: Some(UserId::new(7)),
            user_email: Some("u7@example.com".into()),
            client_ip: Some("10.1.1.1".into()),
        };
        let ctx = args.context().unwrap();
        assert_eq!(ctx.actor.user_id, UserId::new(7));
        assert_eq!(ctx.client.ip.as_deref(), Some("10.1.1.1"));
        assert!(ctx
            .client
            .user_agent
            .as_deref()
            .unwrap()
            .starts_with("brandreg/"));
    }

    #[test]
    fn test_parse_timestamp() {
        let start = parse_timestamp("2024-03-01", false).unwrap();
        assert_eq!(start.day(), 1);
        assert_eq!(start.hour(), 0);

        let end = parse_timestamp("2024-03-01", true).unwrap();
        assert_eq!(end.hour(), 23);
        assert!(end > start);

        let exact = parse_timestamp("2024-03-01T12:30:00+02:00", false).unwrap();
        assert_eq!(exact.hour(), 10);

        assert!(parse_timestamp("yesterday", false).unwrap_err().is_validation());
    }
}
