use parley_core::DeskStore;

use crate::cli::DeliverArgs;
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::desk_failure;
use crate::output::render_delivery;

pub(crate) async fn handle_deliver(ctx: &AppContext, args: DeliverArgs) -> CliResult<()> {
    let desk = ctx.desk();
    desk.refresh_history()
        .await
        .map_err(|err| desk_failure(desk.store(), &err))?;

    desk.select(args.id);
    let guard = desk.store().read(|state| match state.selected() {
        None => Some(format!("Ticket with id {} not found", args.id)),
        Some(record) if !record.is_translated() => {
            Some(format!("Ticket {} is not translated yet ({})", record.id, record.status))
        }
        Some(_) => None,
    });
    if let Some(reason) = guard {
        return Err(CliError::validation(reason));
    }

    let receipt = desk
        .deliver()
        .await
        .map_err(|err| desk_failure(desk.store(), &err))?
        .ok_or_else(|| CliError::validation("Nothing to deliver."))?;

    render_delivery(&receipt, ctx.output)
}
