//! Account and session commands.

use anyhow::{Context as _, Result};
use detail_auth::{AuthError, LoginForm, PasswordStrength, SignupForm};
use detail_gateway::Source;
use dialoguer::{Input, Password};
use serde_json::json;

use super::LoginArgs;
use crate::context::Context;

/// Sign in, prompting for whatever was not given on the command line.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => {
            let mut prompt = Input::<String>::new().with_prompt("Email");
            if let Some(remembered) = ctx.auth.remembered_email()? {
                prompt = prompt.default(remembered);
            }
            prompt.interact_text()?
        }
    };
    let password = Password::new().with_prompt("Password").interact()?;
    let form = LoginForm::new(email.trim(), password).remember(args.remember);

    let spinner = ctx.output.spinner("Signing in");
    let result = ctx.auth.login(&form).await;
    spinner.finish_and_clear();

    let profile = match result {
        Ok(profile) => profile,
        Err(AuthError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                ctx.output.warn(&format!("{}: {}", field.as_str(), message));
            }
            anyhow::bail!("Please correct the highlighted fields");
        }
        Err(e) => return Err(e).context("Sign-in failed"),
    };

    if ctx.output.is_json() {
        ctx.output.json(&profile);
    } else {
        ctx.output.success(&format!("Welcome back, {}", profile.display_name()));
    }
    Ok(())
}

/// Create an account.
pub async fn signup(ctx: &Context) -> Result<()> {
    let first_name: String = Input::new().with_prompt("First name").interact_text()?;
    let last_name: String = Input::new().with_prompt("Last name").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let strength = PasswordStrength::of(&password);
    ctx.output.kv(
        "Strength",
        &format!("{} ({}/{})", strength, strength.score(), PasswordStrength::MAX),
    );
    let confirm_password = Password::new()
        .with_prompt("Confirm password")
        .interact()?;

    let form = SignupForm {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        email: email.trim().to_string(),
        password,
        confirm_password,
    };

    let spinner = ctx.output.spinner("Creating account");
    let result = ctx.auth.register(&form).await;
    spinner.finish_and_clear();

    match result {
        Ok(Some(profile)) => {
            if ctx.output.is_json() {
                ctx.output.json(&profile);
            } else {
                ctx.output.success(&format!(
                    "Account created. Signed in as {}",
                    profile.display_name()
                ));
            }
            Ok(())
        }
        Ok(None) => {
            ctx.output.success("Account created. Run `detail login` to sign in.");
            Ok(())
        }
        Err(AuthError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                ctx.output.warn(&format!("{}: {}", field.as_str(), message));
            }
            anyhow::bail!("Please correct the highlighted fields")
        }
        Err(e) => Err(e).context("Sign-up failed"),
    }
}

/// Sign out.
pub async fn logout(ctx: &Context) -> Result<()> {
    if !ctx.auth.is_authenticated() {
        ctx.output.info("You are not signed in");
        return Ok(());
    }

    ctx.auth.logout().await?;
    ctx.output.success("Signed out");
    Ok(())
}

/// Show the signed-in customer.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.auth.stored_session()?;

    if ctx.output.is_json() {
        let user = session.as_ref().map(|s| {
            json!({
                "user": s.user,
                "signedInAt": s.signed_in_at,
            })
        });
        ctx.output.json(&user);
        return Ok(());
    }

    match session {
        Some(session) => {
            ctx.output.header(&session.user.display_name());
            ctx.output.kv("ID", session.user.id.as_str());
            ctx.output.kv("Email", &session.user.email);
            let since = session.signed_in_at.with_timezone(&chrono::Local);
            ctx.output.kv("Signed in", &since.format("%Y-%m-%d %H:%M").to_string());
        }
        None => ctx.output.info("Browsing as Guest"),
    }
    Ok(())
}

/// Renew the session token.
pub async fn refresh(ctx: &Context) -> Result<()> {
    match ctx.auth.refresh().await {
        Ok(()) => {
            ctx.output.success("Session renewed");
            Ok(())
        }
        Err(AuthError::NotSignedIn) => {
            ctx.output.info("You are not signed in");
            Ok(())
        }
        Err(e) if e.is_auth_failure() => {
            ctx.output.warn("Your session has expired. Run `detail login` to sign in again.");
            Err(e.into())
        }
        Err(e) => Err(e).context("Could not renew session"),
    }
}

/// Check the backend and the stored session.
pub async fn status(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Contacting backend");
    let catalog = ctx.gateway.fetch_categories().await;
    let session = if ctx.auth.is_authenticated() {
        Some(ctx.auth.verify().await)
    } else {
        None
    };
    spinner.finish_and_clear();

    let backend = match &catalog {
        Ok(fetched) => match fetched.source {
            Source::Remote => "online".to_string(),
            Source::Fallback { reason } => format!("offline ({})", reason),
        },
        Err(e) => e.to_string(),
    };
    let signed_in = match &session {
        None => "guest".to_string(),
        Some(Ok(true)) => "valid".to_string(),
        Some(Ok(false)) => "expired".to_string(),
        Some(Err(e)) => format!("unknown ({})", e),
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "api": ctx.config.api.base_url,
            "backend": backend,
            "session": signed_in,
            "cartItems": ctx.cart.total_item_count(),
        }));
        return Ok(());
    }

    ctx.output.header("Status");
    ctx.output.kv("API", &ctx.config.api.base_url);
    ctx.output.kv("Backend", &backend);
    ctx.output.kv("Session", &signed_in);
    ctx.output.kv("Cart items", &ctx.cart.total_item_count().to_string());
    if matches!(session, Some(Ok(false))) {
        ctx.output.warn("Your session has expired. Run `detail login` to sign in again.");
    }
    Ok(())
}
