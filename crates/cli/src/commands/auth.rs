//! Session commands: login, register, logout, whoami.
//!
//! Login and register call the shop API and, on success, hand the returned
//! identity and token to the session store. The store never talks to the
//! network itself.

use thiserror::Error;

use retrovolt_client::{ApiClient, ApiError};
use retrovolt_core::{Email, EmailError};
use retrovolt_store::StoreContext;

/// Errors from auth commands.
#[derive(Debug, Error)]
pub enum AuthCommandError {
    /// The supplied email is not structurally valid.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The API rejected the request or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Sign in and store the session.
pub async fn login(
    ctx: &mut StoreContext,
    api: &ApiClient,
    email: &str,
    password: &str,
) -> Result<(), AuthCommandError> {
    let email = Email::parse(email)?;
    let auth = api.login(&email, password).await?;
    ctx.session.login(auth.user, auth.token);
    println!("Signed in as {email}");
    Ok(())
}

/// Create an account; the API signs the new account in, so store the
/// session just like login.
pub async fn register(
    ctx: &mut StoreContext,
    api: &ApiClient,
    email: &str,
    password: &str,
) -> Result<(), AuthCommandError> {
    let email = Email::parse(email)?;
    let auth = api.register(&email, password).await?;
    ctx.session.login(auth.user, auth.token);
    println!("Registered and signed in as {email}");
    Ok(())
}

/// Sign out, clearing identity and token from memory and storage.
pub fn logout(ctx: &mut StoreContext) {
    ctx.session.logout();
    println!("Signed out");
}

/// Print the current identity, or anonymous.
pub fn whoami(ctx: &StoreContext) {
    match ctx.session.current_identity() {
        Some(identity) => println!("{} ({})", identity.email, identity.role),
        None => println!("Not signed in"),
    }
}
