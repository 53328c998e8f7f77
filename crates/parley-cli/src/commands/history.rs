use parley_core::{DeskStore, TicketApi};

use crate::cli::{HistoryArgs, ShowArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::desk_failure;
use crate::output::{render_history, render_record};

pub(crate) async fn handle_history(ctx: &AppContext, args: HistoryArgs) -> CliResult<()> {
    let desk = ctx.desk();
    desk.change_filter(args.status)
        .await
        .map_err(|err| desk_failure(desk.store(), &err))?;

    let state = desk.store().snapshot();
    render_history(&state.history, state.filter, ctx.output)
}

pub(crate) async fn handle_show(ctx: &AppContext, args: ShowArgs) -> CliResult<()> {
    let record = ctx.api.fetch_record(args.id).await.map_err(CliError::from)?;
    render_record(&record, ctx.output)
}
