use super::{AppContext, CommandResult};
use crate::models::Notice;
use crate::services::dashboard_service;
use crate::utils::Table;

pub async fn execute(ctx: &AppContext, args: &[&str]) -> CommandResult {
    let visible = !args.iter().any(|a| *a == "--hide");
    let summary = dashboard_service::load_dashboard(ctx.gateway.as_ref(), &ctx.session).await?;

    let mut output = String::new();
    let name = ctx
        .session
        .current()
        .map(|s| s.name)
        .unwrap_or_else(|| "there".to_string());
    output.push_str(&format!("🏠 Hello, {}\n\n", name));

    match &summary.balance {
        Some(balance) => output.push_str(&format!("Balance: {}\n", balance.display(visible))),
        None => output.push_str("Balance: no account\n"),
    }
    output.push_str(&format!("Card:    {}\n", summary.card_display()));

    output.push_str("\nRecent transactions\n");
    if summary.transactions.is_empty() {
        output.push_str("  No transactions yet\n");
    } else {
        let mut table = Table::new(&["ID", "Label", "Amount"]);
        for line in &summary.transactions {
            table.add_row(vec![line.id.to_string(), line.label.clone(), line.display_amount()]);
        }
        output.push_str(&table.render());
    }

    for warning in &summary.warnings {
        output.push('\n');
        output.push_str(&Notice::error(warning.clone()).to_string());
    }

    Ok(output.trim_end().to_string())
}
