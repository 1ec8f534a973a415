//! Lazy pagination over the describe call.
//!
//! [`pages`] yields one page per poll and stops after the first page that
//! carries no continuation token. The stream cannot be restarted; a new
//! listing needs a new stream. There is no local page cap: termination
//! depends on the remote service eventually omitting the token.

use crate::error::ParameterStoreError;
use crate::remote::{DescribeRequest, ParameterFilter, ParameterMetadata, ParameterStoreApi};
use crate::sanitize::sanitize_error;
use futures::stream::{self, Stream};

enum Cursor {
    First,
    Next(String),
    Exhausted,
}

/// Stream the pages of a listing filtered server-side by `filters`.
///
/// The first failed call ends the stream with a sanitized
/// [`ParameterStoreError::RemoteList`].
pub fn pages<'a, A>(
    api: &'a A,
    filters: Vec<ParameterFilter>,
) -> impl Stream<Item = Result<Vec<ParameterMetadata>, ParameterStoreError>> + Send + 'a
where
    A: ParameterStoreApi + ?Sized,
{
    stream::try_unfold(Cursor::First, move |cursor| next_page(api, filters.clone(), cursor))
}

async fn next_page<A>(
    api: &A,
    filters: Vec<ParameterFilter>,
    cursor: Cursor,
) -> Result<Option<(Vec<ParameterMetadata>, Cursor)>, ParameterStoreError>
where
    A: ParameterStoreApi + ?Sized,
{
    let next_token = match cursor {
        Cursor::Exhausted => return Ok(None),
        Cursor::First => None,
        Cursor::Next(token) => Some(token),
    };

    let page = api
        .describe_parameters(DescribeRequest {
            filters,
            next_token,
        })
        .await
        .map_err(|e| ParameterStoreError::remote_list(sanitize_error(&e)))?;

    let cursor = match page.next_token {
        Some(token) if !token.is_empty() => Cursor::Next(token),
        _ => Cursor::Exhausted,
    };
    Ok(Some((page.parameters, cursor)))
}
