// ── Comic list effect ──
//
// `LoadRequested` → POST the filter → `LoadSucceeded` plus a last-read
// fan-out, or `LoadFailed` plus one alert. The response carries the
// page's read markers, so one response maps to two actions (a fixed
// fan-out, not a loop).

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use longbox_api::rest::models::{LoadComicsRequest, LoadComicsResponse};

use crate::action::{Action, ComicFilter, ComicListAction, ComicPage, LastReadAction};
use crate::alert::Alert;
use crate::model::Comic;

use super::{EffectContext, failure_alert};

pub(super) async fn run(ctx: EffectContext, cancel: CancellationToken) {
    let mut actions = ctx.store.actions();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            action = actions.recv() => {
                match action {
                    Ok(Action::ComicList(ComicListAction::LoadRequested(filter))) => {
                        // Independent chain per trigger: a newer load does
                        // not cancel this one.
                        let ctx = ctx.clone();
                        tokio::spawn(async move { load_page(&ctx, &filter).await });
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "comic list effect lagged behind the action tap");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

async fn load_page(ctx: &EffectContext, filter: &ComicFilter) {
    let request = LoadComicsRequest::from(filter);
    let result = ctx.client.load_comics(&request).await;

    let (actions, alert) = map_outcome(result);
    for action in actions {
        ctx.store.dispatch(action);
    }
    if let Some(alert) = alert {
        ctx.alerts.publish(alert);
    }
}

/// Pure response→action mapping; the alert is returned, not sent.
fn map_outcome(
    result: Result<LoadComicsResponse, longbox_api::Error>,
) -> (Vec<Action>, Option<Alert>) {
    match result {
        Ok(response) => {
            let page = ComicPage {
                comics: response.comics.into_iter().map(Comic::from).collect(),
                total_count: response.total_count,
                filtered_count: response.filtered_count,
                cover_years: response.cover_years,
                cover_months: response.cover_months,
            };
            let entries = response
                .last_read_entries
                .into_iter()
                .map(Into::into)
                .collect();

            (
                vec![
                    Action::ComicList(ComicListAction::LoadSucceeded(page)),
                    Action::LastRead(LastReadAction::BatchUpdated { entries }),
                ],
                None,
            )
        }
        Err(err) => (
            vec![Action::ComicList(ComicListAction::LoadFailed)],
            Some(failure_alert(
                &err,
                |reason| format!("The library rejected the comic list load: {reason}"),
                || "Unable to load comics from the library server.".to_owned(),
            )),
        ),
    }
}
