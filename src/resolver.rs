//! Turns what the user typed after `play` into something Spotify can play.
//!
//! A reference is tried, in order, as:
//!
//! 1. an ordinal (`3`) into the last search results of the requested kind
//! 2. the exact name (ignoring case) of one of the user's saved items
//! 3. the query of a live search limited to one result
//!
//! The live search in step 3 never touches the search cache.

use crate::{
    CliError, Res,
    management::SearchCache,
    spotify::Gateway,
    types::{Device, Item, Kind, PlaybackReference},
};

/// Turns what the user typed after `play` into something playable.
///
/// # Arguments
///
/// * `gateway` - Used for the saved-library lookup and the live search
/// * `cache` - The last search, for ordinals
/// * `token` - An ordinal (`3`) or a name/query (`Hey Jude`)
/// * `kind` - Which kind of item the token refers to
///
/// # Returns
///
/// A track reference for tracks, a context reference for albums, artists
/// and playlists.
///
/// # Errors
///
/// - [`CliError::NoSearchResults`] for an ordinal before any search
/// - [`CliError::IndexOutOfRange`] for ordinal `0` or one past the results
/// - [`CliError::NoMatchFound`] when neither the library nor the search finds it
/// - any gateway error from the lookups
pub async fn resolve<G>(
    gateway: &mut G,
    cache: &SearchCache,
    token: &str,
    kind: Kind,
) -> Res<PlaybackReference>
where
    G: Gateway + ?Sized,
{
    resolve_item(gateway, cache, token, kind)
        .await
        .map(|item| item.to_reference())
}

/// Same as [`resolve`], but keeps the whole item for display.
pub async fn resolve_item<G>(
    gateway: &mut G,
    cache: &SearchCache,
    token: &str,
    kind: Kind,
) -> Res<Item>
where
    G: Gateway + ?Sized,
{
    let token = token.trim();

    if let Ok(ordinal) = token.parse::<usize>() {
        return cache.lookup(kind, ordinal);
    }

    let saved = gateway.saved_items(kind).await?;
    if let Some(item) = saved
        .into_iter()
        .find(|item| item.name().to_lowercase() == token.to_lowercase())
    {
        return Ok(item);
    }

    let found = gateway.search(token, &[kind], 1).await?;
    found
        .get(kind, 0)
        .ok_or_else(|| CliError::NoMatchFound {
            kind: kind.to_string(),
            query: token.to_string(),
        })
}

/// Finds a device by its 1-based position in `devices` or by name.
pub fn resolve_device<'a>(devices: &'a [Device], token: &str) -> Res<&'a Device> {
    let token = token.trim();

    let found = match token.parse::<usize>() {
        Ok(n) if n >= 1 => devices.get(n - 1),
        Ok(_) => None,
        Err(_) => devices
            .iter()
            .find(|d| d.name.to_lowercase() == token.to_lowercase()),
    };

    found.ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "no device '{}', run 'devices' to list the available ones",
            token
        ))
    })
}
