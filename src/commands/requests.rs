use tracing::debug;

use super::{parse_id, AppContext, CommandResult};
use crate::models::{Decision, Notice, NoticeKind};
use crate::services::Confirmer;
use crate::utils::Table;

/// Fetch and show incoming transfer requests
pub async fn list(ctx: &AppContext) -> CommandResult {
    let notice = ctx.requests.refresh().await?;
    Ok(render(ctx, &notice).await)
}

async fn render(ctx: &AppContext, notice: &Notice) -> String {
    let rows = ctx.requests.rows().await;
    if rows.is_empty() {
        return format!("🔔 {}", notice.message);
    }

    let mut table = Table::new(&["ID", "From", "Email", "Amount", "Description", "Date"]);
    for row in &rows {
        table.add_row(vec![
            row.id.to_string(),
            row.sender_name.clone(),
            row.sender_email.clone(),
            row.amount.clone(),
            row.description.clone(),
            row.date.clone(),
        ]);
    }
    format!(
        "🔔 {}\n\n{}\nUse `accept <id>` or `reject <id>`.",
        notice.message,
        table.render()
    )
}

pub async fn accept<C: Confirmer + ?Sized>(
    ctx: &AppContext,
    args: &[&str],
    confirmer: &mut C,
) -> CommandResult {
    decide(ctx, args, confirmer, Decision::Accept).await
}

pub async fn reject<C: Confirmer + ?Sized>(
    ctx: &AppContext,
    args: &[&str],
    confirmer: &mut C,
) -> CommandResult {
    decide(ctx, args, confirmer, Decision::Reject).await
}

async fn decide<C: Confirmer + ?Sized>(
    ctx: &AppContext,
    args: &[&str],
    confirmer: &mut C,
    decision: Decision,
) -> CommandResult {
    let id = parse_id(args.first(), "request ID")?;

    // Nothing listed yet in this run: fetch first so the id can be resolved.
    if ctx.requests.state_of(id).await.is_none() {
        debug!("Request {} not in the working list, refreshing", id);
        ctx.requests.refresh().await?;
    }

    let notice = match decision {
        Decision::Accept => ctx.requests.request_accept(id, confirmer).await?,
        Decision::Reject => ctx.requests.request_reject(id, confirmer).await?,
    };

    let mut output = notice.to_string();
    if ctx.config.refresh_after_decision && notice.kind == NoticeKind::Success {
        match ctx.requests.refresh().await {
            Ok(refreshed) => {
                output.push_str("\n\n");
                output.push_str(&render(ctx, &refreshed).await);
            }
            Err(e) => debug!("Refresh after {} failed: {}", decision, e),
        }
    }
    Ok(output)
}
