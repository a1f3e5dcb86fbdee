use super::{AppContext, CommandResult};
use crate::services::profile_service;

pub fn show(ctx: &AppContext) -> String {
    let view = profile_service::profile(&ctx.session);
    let status = if ctx.session.is_authenticated() {
        "signed in"
    } else {
        "signed out"
    };
    format!("👤 {}\n   {}\n   ({})", view.name, view.email, status)
}

pub fn logout(ctx: &AppContext) -> CommandResult {
    let notice = profile_service::logout(&ctx.session)?;
    Ok(notice.to_string())
}
