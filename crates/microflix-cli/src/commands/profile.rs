use microflix_api_models::{ChangePasswordRequest, UpdateProfileRequest};
use tracing::info;

use crate::cli::{OutputFormat, PasswordArgs, RenameArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_profile;

pub(crate) async fn handle_profile_rename(
    ctx: &AppContext,
    args: RenameArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let display_name = args.display_name.trim().to_string();
    if display_name.is_empty() {
        return Err(CliError::validation("display name must not be empty"));
    }
    let mut session = ctx.require_session()?;

    let profile = ctx
        .api
        .update_profile(&session.token, &UpdateProfileRequest { display_name })
        .await
        .map_err(|err| ctx.classify(err))?;

    // The stored record greets the user, so keep it in step.
    session.display_name.clone_from(&profile.display_name);
    ctx.session.save(&session);
    info!(display_name = %profile.display_name, "display name updated");
    print!("{}", render_profile(&profile, format)?);
    Ok(())
}

pub(crate) async fn handle_profile_password(ctx: &AppContext, args: PasswordArgs) -> CliResult<()> {
    let session = ctx.require_session()?;
    let old_password = prompt_if_missing(args.current, "Current password: ")?;
    let new_password = prompt_if_missing(args.new, "New password: ")?;
    if old_password.is_empty() || new_password.is_empty() {
        return Err(CliError::validation("passwords must not be empty"));
    }
    if old_password == new_password {
        return Err(CliError::validation(
            "new password must differ from the current one",
        ));
    }

    ctx.api
        .change_password(
            &session.token,
            &ChangePasswordRequest {
                old_password,
                new_password,
            },
        )
        .await
        .map_err(|err| ctx.classify(err))?;

    info!("password changed");
    println!("Password changed");
    Ok(())
}

fn prompt_if_missing(provided: Option<String>, prompt: &str) -> CliResult<String> {
    match provided {
        Some(value) => Ok(value),
        None => rpassword::prompt_password(prompt)
            .map_err(|err| CliError::failure(anyhow::anyhow!("failed to read password: {err}"))),
    }
}
