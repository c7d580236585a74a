//! Follows the recordings listing's continuation token until it runs out.

use anyhow::{bail, Result};
use tracing::info;

use crate::config::DateRange;
use crate::zoom::{Meeting, RecordingsApi};

/// Every meeting returned for a date range, in page order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub meetings: Vec<Meeting>,
    pub page_count: u32,
}

/// Fetch all pages for `range`.
///
/// The loop ends only when a page comes back without a continuation token.
/// A failed request aborts the whole collection. An upstream that hands back
/// the token it was just given is rejected rather than followed forever.
pub async fn collect_meetings<A>(api: &A, range: &DateRange) -> Result<Collection>
where
    A: RecordingsApi + ?Sized,
{
    let mut collection = Collection::default();
    let mut page_token = String::new();

    loop {
        let page_number = collection.page_count + 1;
        info!("Fetching recordings page {}", page_number);

        let page = api.list_recordings_page(range, &page_token).await?;
        collection.page_count = page_number;
        if page_number == 1 {
            if let Some(total) = page.total_records {
                info!("Zoom reports {} meeting(s) in range", total);
            }
        }

        let next = page.next_token().map(str::to_owned);
        let fetched = page.meetings.len();
        collection.meetings.extend(page.meetings);

        match next {
            Some(token) => {
                info!(
                    "Page {}: {} meeting(s), more pages available",
                    page_number, fetched
                );
                if token == page_token {
                    bail!(
                        "Zoom returned the same continuation token twice in a row (page {}), refusing to loop",
                        page_number
                    );
                }
                page_token = token;
            }
            None => {
                info!("Page {}: {} meeting(s), last page", page_number, fetched);
                break;
            }
        }
    }

    info!(
        "Collected {} meeting(s) across {} page(s)",
        collection.meetings.len(),
        collection.page_count
    );

    Ok(collection)
}
