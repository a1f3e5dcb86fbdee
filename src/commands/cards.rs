use super::{usage, AppContext, CommandResult};
use crate::services::card_service::{self, NewCardForm};
use crate::utils::Table;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => list(ctx).await,
        Some(&"add") => add(ctx, &args[1..]).await,
        Some(_) => Err(usage("cards [add <number> <MM> <YYYY> <cvv> <holder name...>]")),
    }
}

async fn list(ctx: &AppContext) -> CommandResult {
    let cards = card_service::list_cards(ctx.gateway.as_ref(), &ctx.session).await?;
    if cards.is_empty() {
        return Ok("💳 No cards yet. Add one with `cards add`.".to_string());
    }

    let mut table = Table::new(&["ID", "Type", "Number", "Holder", "Expiry", "Status"]);
    for card in &cards {
        table.add_row(vec![
            card.id.to_string(),
            card.card_type.clone(),
            card.masked_number.clone(),
            card.holder.clone(),
            card.expiry.clone(),
            if card.status.is_usable() {
                card.status.to_string()
            } else {
                format!("{} ⚠", card.status)
            },
        ]);
    }
    Ok(format!("💳 Your cards\n\n{}", table.render().trim_end()))
}

async fn add(ctx: &AppContext, args: &[&str]) -> CommandResult {
    if args.len() < 5 {
        return Err(usage("cards add <number> <MM> <YYYY> <cvv> <holder name...>"));
    }
    let form = NewCardForm {
        number: args[0].to_string(),
        expiry_month: args[1].to_string(),
        expiry_year: args[2].to_string(),
        cvv: args[3].to_string(),
        holder: args[4..].join(" "),
    };
    let notice = card_service::add_card(ctx.gateway.as_ref(), &ctx.session, &form).await?;

    // Show the updated list right away, as the cards screen reloads after an add.
    let listing = list(ctx)
        .await
        .unwrap_or_else(|e| format!("(could not reload cards: {})", e.user_message()));
    Ok(format!("{}\n\n{}", notice, listing))
}
