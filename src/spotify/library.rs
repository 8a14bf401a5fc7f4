use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Res, config,
    spotify::check,
    types::{
        FollowedArtistsResponse, Item, Kind, Paging, Playlist, SavedAlbum, SavedTrack,
        SearchResponse, SearchResults, User,
    },
};

/// Page size used for saved library lookups; only the first page is read.
pub const SAVED_ITEMS_LIMIT: u32 = 50;

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    path: &str,
    query: &[(&str, String)],
) -> Res<T> {
    let api_url = format!("{uri}{path}", uri = &config::spotify_apiurl());
    let res = client
        .get(&api_url)
        .bearer_auth(token)
        .query(query)
        .send()
        .await?;
    Ok(check(res).await?.json::<T>().await?)
}

pub async fn me(client: &Client, token: &str) -> Res<User> {
    get_json(client, token, "/me", &[]).await
}

/// `GET /search` for every kind in `kinds`, `limit` results per kind.
pub async fn search(
    client: &Client,
    token: &str,
    query: &str,
    kinds: &[Kind],
    limit: u32,
) -> Res<SearchResults> {
    let types = kinds
        .iter()
        .map(|k| k.as_api_type())
        .collect::<Vec<_>>()
        .join(",");

    let res: SearchResponse = get_json(
        client,
        token,
        "/search",
        &[
            ("q", query.to_string()),
            ("type", types),
            ("limit", limit.to_string()),
        ],
    )
    .await?;

    Ok(SearchResults::from(res))
}

pub async fn saved_items(client: &Client, token: &str, kind: Kind) -> Res<Vec<Item>> {
    let limit = ("limit", SAVED_ITEMS_LIMIT.to_string());

    let items = match kind {
        Kind::Track => {
            let page: Paging<SavedTrack> = get_json(client, token, "/me/tracks", &[limit]).await?;
            page.items.into_iter().map(|s| Item::Track(s.track)).collect()
        }
        Kind::Album => {
            let page: Paging<SavedAlbum> = get_json(client, token, "/me/albums", &[limit]).await?;
            page.items.into_iter().map(|s| Item::Album(s.album)).collect()
        }
        Kind::Artist => {
            let res: FollowedArtistsResponse = get_json(
                client,
                token,
                "/me/following",
                &[("type", "artist".to_string()), limit],
            )
            .await?;
            res.artists.items.into_iter().map(Item::Artist).collect()
        }
        Kind::Playlist => {
            let page: Paging<Option<Playlist>> =
                get_json(client, token, "/me/playlists", &[limit]).await?;
            page.items.into_iter().flatten().map(Item::Playlist).collect()
        }
    };

    Ok(items)
}
