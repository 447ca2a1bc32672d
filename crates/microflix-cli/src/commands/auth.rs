use microflix_api_models::{LoginRequest, RegisterRequest, SessionRecord};
use tracing::info;

use crate::cli::{LoginArgs, OutputFormat, RegisterArgs};
use crate::client::{AppContext, CliError, CliResult, classify_api_error};
use crate::output::render_profile;

pub(crate) async fn handle_login(ctx: &AppContext, args: LoginArgs) -> CliResult<()> {
    let email = require_email(&args.email)?;
    let password = resolve_password(args.password)?;

    let session = ctx
        .api
        .login(&LoginRequest { email, password })
        .await
        .map_err(classify_api_error)?;

    store_session(ctx, &session);
    Ok(())
}

pub(crate) async fn handle_register(ctx: &AppContext, args: RegisterArgs) -> CliResult<()> {
    let email = require_email(&args.email)?;
    let display_name = args.display_name.trim().to_string();
    if display_name.is_empty() {
        return Err(CliError::validation("display name must not be empty"));
    }
    let password = resolve_password(args.password)?;

    let session = ctx
        .api
        .register(&RegisterRequest {
            email,
            password,
            display_name,
        })
        .await
        .map_err(classify_api_error)?;

    store_session(ctx, &session);
    Ok(())
}

pub(crate) fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    ctx.session.clear();
    println!("Signed out");
    Ok(())
}

pub(crate) async fn handle_whoami(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.require_session()?;
    let profile = ctx
        .api
        .fetch_profile(&session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    print!("{}", render_profile(&profile, format)?);
    Ok(())
}

fn store_session(ctx: &AppContext, session: &SessionRecord) {
    ctx.session.save(session);
    info!(email = %session.email, "session stored");
    println!("Signed in as {}", session.display_name);
}

fn require_email(raw: &str) -> CliResult<String> {
    let email = raw.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(CliError::validation("a valid email address is required"));
    }
    Ok(email.to_string())
}

fn resolve_password(provided: Option<String>) -> CliResult<String> {
    let password = match provided {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|err| CliError::failure(anyhow::anyhow!("failed to read password: {err}")))?,
    };
    if password.is_empty() {
        return Err(CliError::validation("password must not be empty"));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::test_support::{JSON, context_with, signed_in};

    #[tokio::test]
    async fn login_stores_session() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/user-service/api/v1/auth/login")
                .json_body(json!({"email": "ana@example.com", "password": "hunter22"}));
            then.status(200).header("content-type", JSON).body(
                r#"{"token":"jwt","email":"ana@example.com","displayName":"Ana","roles":"USER"}"#,
            );
        });
        let ctx = context_with(&server, &dir);

        handle_login(
            &ctx,
            LoginArgs {
                email: " ana@example.com ".into(),
                password: Some("hunter22".into()),
            },
        )
        .await
        .expect("login should succeed");

        mock.assert();
        let stored = ctx.require_session().expect("session stored");
        assert_eq!(stored.display_name, "Ana");
    }

    #[tokio::test]
    async fn bad_credentials_leave_no_session() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        server.mock(|when, then| {
            when.method(POST).path("/user-service/api/v1/auth/login");
            then.status(401)
                .header("content-type", JSON)
                .body(r#"{"title":"Unauthorized","detail":"Invalid credentials"}"#);
        });
        let ctx = context_with(&server, &dir);

        let err = handle_login(
            &ctx,
            LoginArgs {
                email: "ana@example.com".into(),
                password: Some("wrong".into()),
            },
        )
        .await
        .expect_err("login should fail");

        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "Invalid credentials (status 401)");
        assert!(ctx.session.load().is_none());
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_locally() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        let ctx = context_with(&server, &dir);
        let err = handle_register(
            &ctx,
            RegisterArgs {
                email: "not-an-email".into(),
                display_name: "Ana".into(),
                password: Some("hunter22".into()),
            },
        )
        .await
        .expect_err("validation");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn whoami_with_revoked_token_signs_out() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        server.mock(|when, then| {
            when.method(GET)
                .path("/user-service/api/v1/users/me")
                .header("authorization", "Bearer jwt");
            then.status(401);
        });
        let ctx = signed_in(&server, &dir);

        let err = handle_whoami(&ctx, OutputFormat::Table)
            .await
            .expect_err("expired");

        assert_eq!(err.exit_code(), 3);
        assert!(ctx.session.load().is_none());
    }

    #[test]
    fn logout_clears_session() {
        let dir = TempDir::new().expect("temp dir");
        let ctx = AppContext::new("http://127.0.0.1:9", dir.path().to_path_buf())
            .expect("context");
        ctx.session.save(&SessionRecord {
            token: "jwt".into(),
            email: "ana@example.com".into(),
            display_name: "Ana".into(),
            roles: "USER".into(),
        });
        handle_logout(&ctx).expect("logout");
        assert!(ctx.session.load().is_none());
    }
}
