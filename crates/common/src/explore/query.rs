use async_stream::try_stream;
use futures::{pin_mut, Stream, TryStreamExt};

use crate::storage::{ListQuery, RawEntry, StorageError, StorageProvider};

/// Lazily drain a scoped flat listing, page by page.
///
/// Entries come out in backend-delivered order; nothing is re-sorted here.
/// With `self_ignore` set, grouping rows whose common prefix exactly equals
/// the query's non-empty prefix are dropped: some backends echo the queried
/// prefix back as a zero-content grouping row, which would otherwise
/// surface as an entry referring to the level being listed.
///
/// Each poll fetches at most one page, so callers that stop early never
/// pay for the rest of the listing. The stream is restartable by calling
/// this again with the same query.
pub fn stream_entries<'a>(
    provider: &'a dyn StorageProvider,
    query: &'a ListQuery,
    self_ignore: bool,
) -> impl Stream<Item = Result<RawEntry, StorageError>> + 'a {
    try_stream! {
        let mut page_token: Option<String> = None;

        loop {
            let page = provider.list_page(query, page_token.as_deref()).await?;

            for entry in page.entries {
                if self_ignore
                    && entry.is_grouping()
                    && !query.prefix.is_empty()
                    && entry.common_prefix == query.prefix
                {
                    continue;
                }
                yield entry;
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
    }
}

/// Drain the listing fully into memory.
///
/// Any error while advancing the cursor aborts the whole call; no partial
/// entry list is returned.
pub async fn drain_entries(
    provider: &dyn StorageProvider,
    query: &ListQuery,
    self_ignore: bool,
) -> Result<Vec<RawEntry>, StorageError> {
    let stream = stream_entries(provider, query, self_ignore);
    pin_mut!(stream);
    stream.try_collect().await
}
