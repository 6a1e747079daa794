//! `longbox users` -- list server accounts.

use tabled::Tabled;

use longbox_core::{Session, User, UserListAction};

use crate::cli::{GlobalOpts, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::{build_server_config, wait_until};

pub async fn handle(command: UsersCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        UsersCommand::List => list(global).await,
    }
}

async fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let config = build_server_config(global)?;
    let format = global.output.clone();

    let users = Session::oneshot(config, |session| async move {
        session.dispatch(UserListAction::LoadRequested);
        let snapshot = wait_until(&session, |s| !s.user_list.loading)
            .await
            .map_err(|e| longbox_core::CoreError::OperationFailed {
                message: e.to_string(),
            })?;
        Ok(snapshot.user_list.entries.clone())
    })
    .await?;

    println!(
        "{}",
        output::render_list(&format, &users, |u| UserRow::from(u), |u| u.login.clone())
    );
    Ok(())
}

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Login")]
    login: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Admin")]
    admin: bool,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            login: user.login.clone(),
            email: user.email.clone().unwrap_or_else(|| "-".into()),
            admin: user.admin,
        }
    }
}
