//! Issue a signed session token for local testing

use anyhow::{Result, bail};
use chrono::{Duration, Utc};
use clap::Args;
use verdant_server::auth::{AuthConfig, SessionClaims, SessionValidator};

use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User id placed in the `sub` claim
    pub subject: String,

    /// Subscription plan claim
    #[arg(long, default_value = "free")]
    pub plan: String,

    /// Operating mode claim
    #[arg(long, default_value = "personal")]
    pub mode: String,

    /// Mark the token holder as an application administrator
    #[arg(long)]
    pub admin: bool,

    /// Minutes until the token expires
    #[arg(long, default_value_t = 60)]
    pub ttl_minutes: i64,
}

pub fn run(args: TokenArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", issue(&args, config.auth)?);
    Ok(())
}

fn issue(args: &TokenArgs, auth: AuthConfig) -> Result<String> {
    if !auth.is_valid() {
        bail!("no session secret configured; set [auth] secret or VERDANT_AUTH_SECRET");
    }

    let exp = (Utc::now() + Duration::minutes(args.ttl_minutes)).timestamp();
    let mut claims = SessionClaims::new(&args.subject, exp).with_plan(&args.plan, &args.mode);
    if args.admin {
        claims = claims.with_app_role("admin");
    }

    let validator = SessionValidator::new(auth)?;
    Ok(validator.issue(&claims)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(subject: &str) -> TokenArgs {
        TokenArgs {
            subject: subject.to_string(),
            plan: "creator_plus".to_string(),
            mode: "personal".to_string(),
            admin: false,
            ttl_minutes: 5,
        }
    }

    #[test]
    fn test_issued_token_validates() {
        let auth = AuthConfig::new("local-secret").with_issuer("verdant");
        let token = issue(&args("u1"), auth.clone()).unwrap();

        let claims = SessionValidator::new(auth).unwrap().validate(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.plan.as_deref(), Some("creator_plus"));
        assert_eq!(claims.iss.as_deref(), Some("verdant"));
    }

    #[test]
    fn test_issue_requires_secret() {
        assert!(issue(&args("u1"), AuthConfig::default()).is_err());
    }
}
