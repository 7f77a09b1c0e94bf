//! Check a single capability for a profile
//!
//! Exits with status 1 when the capability is denied so the command can be
//! used from scripts.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use verdant_core::{Entitlements, normalize_key};

use super::ProfileArgs;

#[derive(Debug, Args)]
pub struct CanArgs {
    /// Capability key, canonical or legacy
    pub key: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

pub fn run(args: CanArgs) -> Result<ExitCode> {
    let ent = args.profile.compile();
    let (allowed, message) = check(&ent, &args.key);
    println!("{}", message);
    Ok(exit_code(allowed))
}

fn exit_code(allowed: bool) -> ExitCode {
    if allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn check(ent: &Entitlements, key: &str) -> (bool, String) {
    match normalize_key(key) {
        Some(capability) if ent.can(capability) => (true, format!("allowed: {}", capability)),
        Some(capability) => (false, format!("denied: {}", capability)),
        None => (
            ent.can_key(key),
            format!("denied: unknown capability {:?}", key),
        ),
    }
}
