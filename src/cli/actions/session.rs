use crate::auth::{AuthClient, AuthController, AuthState, DiskStore, LogNavigator, PersistentStore};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;
use secrecy::ExposeSecret;
use tracing::info;

/// Handle a session action against the configured backend.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let client = AuthClient::new(&globals.base_url)?;
    let store = DiskStore::new(&globals.state_dir);
    let controller = AuthController::new(client, AuthState::new(), store.clone(), LogNavigator);

    match action {
        Action::Check { token, session_id } => {
            controller
                .check_token(token.expose_secret(), &session_id)
                .await?;
            info!("token accepted, session committed");
            println!("ok");
        }

        Action::Mount { token, session_id } => {
            controller.mount(token.expose_secret(), &session_id).await?;
            info!("per-user resource mounted");
            println!("mounted");
        }

        Action::Status { session_id } => {
            if controller.rehydrate(&session_id).await? {
                // rehydrate only returns true after a successful commit
                if let Some(session) = controller.state().read() {
                    println!("authenticated: {}", serde_json::to_string(&session.user)?);
                }
            } else {
                println!("unauthenticated");
            }
        }

        Action::Logout {
            session_id,
            redirect,
        } => {
            // Pick up whatever token survived so the invalidate call carries
            // it. A malformed leftover still gets cleaned up below.
            if let Some(token) = store.load()? {
                let _ = controller.login(&token, &session_id);
            }

            controller.logout(redirect).await?;
            info!("logged out");
            println!("logged out");
        }
    }

    Ok(())
}
