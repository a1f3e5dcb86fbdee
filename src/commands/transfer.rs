use super::{parse_amount, parse_id, usage, AppContext, CommandResult};
use crate::services::transfer_service;

pub async fn send(ctx: &AppContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(usage("send <from_account_id> <rib> <amount> [description...]"));
    }
    let from_account_id = parse_id(args.first(), "account ID")?;
    let amount = parse_amount(args[2])?;
    let description = args[3..].join(" ");

    let notice = transfer_service::send_transfer(
        ctx.gateway.as_ref(),
        &ctx.session,
        from_account_id,
        args[1],
        amount,
        &description,
    )
    .await?;
    Ok(notice.to_string())
}

pub async fn offer(ctx: &AppContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(usage("offer <email> <amount> [description...]"));
    }
    let amount = parse_amount(args[1])?;
    let description = args[2..].join(" ");

    let notice = transfer_service::offer_transfer(
        ctx.gateway.as_ref(),
        &ctx.session,
        args[0],
        amount,
        &description,
    )
    .await?;
    Ok(notice.to_string())
}
