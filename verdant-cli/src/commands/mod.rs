pub mod can;
pub mod catalog;
pub mod compute;
pub mod config;
pub mod serve;
pub mod token;

use clap::Args;
use verdant_core::{AppRole, Entitlements, compute};

/// Profile values shared by commands that compile entitlements
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Subscription plan (free, pro, creator_plus, commercial, facility)
    #[arg(long, default_value = "free")]
    pub plan: String,

    /// Operating mode (personal, commercial, facility)
    #[arg(long, default_value = "personal")]
    pub mode: String,

    /// Compile as an application administrator
    #[arg(long)]
    pub admin: bool,

    /// Role inside the active facility (OWNER, MANAGER, STAFF, VIEWER, AUDITOR)
    #[arg(long)]
    pub facility_role: Option<String>,
}

impl ProfileArgs {
    pub fn app_role(&self) -> AppRole {
        if self.admin {
            AppRole::Admin
        } else {
            AppRole::User
        }
    }

    pub fn compile(&self) -> Entitlements {
        compute(
            &self.plan,
            &self.mode,
            self.app_role().as_str(),
            self.facility_role.as_deref(),
        )
    }
}
