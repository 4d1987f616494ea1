use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// Map validated CLI matches to the global arguments and the action to run.
///
/// # Errors
///
/// Returns an error if required arguments are missing or the subcommand is
/// unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<(GlobalArgs, Action)> {
    let base_url = matches
        .get_one::<String>("base-url")
        .cloned()
        .context("missing required argument: --base-url")?;

    let state_dir = matches
        .get_one::<String>("state-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".pordisto"));

    let globals = GlobalArgs::new(base_url, state_dir);

    // Closure to return subcommand matches
    let sub_m = |subcommand| -> Result<&clap::ArgMatches> {
        matches
            .subcommand_matches(subcommand)
            .context("arguments not found")
    };

    let token = |m: &clap::ArgMatches| -> Result<SecretString> {
        m.get_one::<String>("token")
            .map(|t| SecretString::from(t.clone()))
            .context("missing required argument: --token")
    };

    let session_id = |m: &clap::ArgMatches| -> Result<String> {
        m.get_one::<String>("session-id")
            .cloned()
            .context("missing required argument: --session-id")
    };

    let action = match matches.subcommand_name() {
        Some("check") => {
            let m = sub_m("check")?;
            Action::Check {
                token: token(m)?,
                session_id: session_id(m)?,
            }
        }
        Some("mount") => {
            let m = sub_m("mount")?;
            Action::Mount {
                token: token(m)?,
                session_id: session_id(m)?,
            }
        }
        Some("status") => {
            let m = sub_m("status")?;
            Action::Status {
                session_id: session_id(m)?,
            }
        }
        Some("logout") => {
            let m = sub_m("logout")?;
            Action::Logout {
                session_id: session_id(m)?,
                redirect: !m.get_flag("no-redirect"),
            }
        }
        _ => anyhow::bail!("no subcommand provided"),
    };

    Ok((globals, action))
}
