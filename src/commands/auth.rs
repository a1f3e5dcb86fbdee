use super::{usage, AppContext, CommandResult};
use crate::services::auth_service::{self, RegistrationForm};

pub async fn login(ctx: &AppContext, args: &[&str]) -> CommandResult {
    let [email, password] = args else {
        return Err(usage("login <email> <password>"));
    };
    let notice = auth_service::login(ctx.gateway.as_ref(), &ctx.session, email, password).await?;
    Ok(notice.to_string())
}

pub async fn signup(ctx: &AppContext, args: &[&str]) -> CommandResult {
    if !(5..=6).contains(&args.len()) {
        return Err(usage(
            "signup <first> <last> <email> <password> <confirm> [phone]",
        ));
    }
    let form = RegistrationForm {
        first_name: args[0].to_string(),
        last_name: args[1].to_string(),
        email: args[2].to_string(),
        password: args[3].to_string(),
        confirm_password: args[4].to_string(),
        phone: args.get(5).map(|p| p.to_string()).unwrap_or_default(),
    };
    let notice = auth_service::register(ctx.gateway.as_ref(), &ctx.session, &form).await?;
    Ok(notice.to_string())
}
