use anyhow::Result;
use posadmin_client::CredentialStore;
use tracing::info;

use crate::context::ExecutionContext;
use crate::presentation::MutationViewModel;
use crate::presentation::presenters::present_session;

pub async fn login(ctx: &ExecutionContext, email: &str, password: &str) -> Result<()> {
    let info = ctx.api()?.login(email, password).await?;
    info!(email = %info.email, "logged in");
    ctx.renderer().render(&present_session(Some(info)))
}

/// Forget cached credentials without contacting the backend
pub fn logout(ctx: &ExecutionContext) -> Result<()> {
    ctx.credentials_store().clear()?;
    ctx.renderer().render(&MutationViewModel::<()> {
        message: "Logged out.".to_string(),
        record: None,
    })
}

/// Verify cached credentials against the backend.
///
/// Nothing cached is not an error. Rejected credentials are cleared and
/// reported as an expired session.
pub async fn whoami(ctx: &ExecutionContext) -> Result<()> {
    if ctx.credentials_store().load()?.is_none() {
        return ctx.renderer().render(&present_session(None));
    }
    let info = ctx.api()?.restore().await?;
    ctx.renderer().render(&present_session(info))
}
