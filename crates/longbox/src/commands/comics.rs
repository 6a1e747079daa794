//! `longbox comics` -- browse the comic list.

use tabled::Tabled;

use longbox_core::{Comic, ComicFilter, ComicListAction, Session, SortDirection, SortField};

use crate::cli::{ComicsCommand, ComicsListArgs, GlobalOpts, SortColumn};
use crate::error::CliError;
use crate::output;

use super::{build_server_config, wait_until};

pub async fn handle(command: ComicsCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        ComicsCommand::List(args) => list(args, global).await,
    }
}

async fn list(args: ComicsListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = build_server_config(global)?;
    let filter = filter_from_args(&args);
    let format = global.output.clone();

    let (comics, total, filtered) = Session::oneshot(config, |session| async move {
        session.dispatch(ComicListAction::LoadRequested(filter));
        let snapshot = wait_until(&session, |s| !s.comic_list.list.loading)
            .await
            .map_err(|e| longbox_core::CoreError::OperationFailed {
                message: e.to_string(),
            })?;

        Ok((
            snapshot.comic_list.list.entries.clone(),
            snapshot.comic_list.list.total_count,
            snapshot.comic_list.list.filtered_count,
        ))
    })
    .await?;

    println!(
        "{}",
        output::render_list(&format, &comics, |c| ComicRow::from(c), |c| c.id.to_string())
    );
    eprintln!("{filtered} of {total} comics match");
    Ok(())
}

fn filter_from_args(args: &ComicsListArgs) -> ComicFilter {
    ComicFilter {
        page_size: args.page_size,
        page_index: args.page,
        cover_year: args.cover_year,
        cover_month: args.cover_month,
        archive_type: None,
        publisher: args.publisher.clone(),
        series: args.series.clone(),
        search_text: args.search.clone(),
        unread_only: args.unread,
        sort_by: args.sort_by.map(|column| match column {
            SortColumn::AddedDate => SortField::AddedDate,
            SortColumn::CoverDate => SortField::CoverDate,
            SortColumn::IssueNumber => SortField::IssueNumber,
            SortColumn::Series => SortField::Series,
        }),
        sort_direction: if args.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    }
}

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ComicRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Publisher")]
    publisher: String,
    #[tabled(rename = "Series")]
    series: String,
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "Cover date")]
    cover_date: String,
    #[tabled(rename = "Pages")]
    pages: u32,
}

impl From<&Comic> for ComicRow {
    fn from(comic: &Comic) -> Self {
        Self {
            id: comic.id.to_string(),
            publisher: comic.publisher.clone().unwrap_or_else(|| "-".into()),
            series: comic.series.clone().unwrap_or_else(|| "-".into()),
            issue: comic.issue_number.clone().unwrap_or_else(|| "-".into()),
            cover_date: comic
                .cover_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
            pages: comic.page_count,
        }
    }
}
