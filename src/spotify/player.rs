use reqwest::{Client, StatusCode, header::CONTENT_LENGTH};

use crate::{
    Res, config,
    spotify::check,
    types::{CurrentlyPlaying, Device, DevicesResponse, PlayRequest, PlayerState, TransferRequest},
};

fn player_url(path: &str) -> String {
    format!("{uri}/me/player{path}", uri = &config::spotify_apiurl())
}

/// `PUT /me/player/play`. An empty request resumes the current context.
pub async fn play(
    client: &Client,
    token: &str,
    device_id: Option<&str>,
    request: &PlayRequest,
) -> Res<()> {
    let mut req = client.put(player_url("/play")).bearer_auth(token);
    if let Some(id) = device_id {
        req = req.query(&[("device_id", id)]);
    }

    let req = if request.uris.is_none() && request.context_uri.is_none() {
        req.header(CONTENT_LENGTH, 0)
    } else {
        req.json(request)
    };

    check(req.send().await?).await?;
    Ok(())
}

pub async fn pause(client: &Client, token: &str) -> Res<()> {
    let res = client
        .put(player_url("/pause"))
        .bearer_auth(token)
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

pub async fn next(client: &Client, token: &str) -> Res<()> {
    let res = client
        .post(player_url("/next"))
        .bearer_auth(token)
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

pub async fn previous(client: &Client, token: &str) -> Res<()> {
    let res = client
        .post(player_url("/previous"))
        .bearer_auth(token)
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

pub async fn seek(client: &Client, token: &str, position_ms: u64) -> Res<()> {
    let res = client
        .put(player_url("/seek"))
        .bearer_auth(token)
        .query(&[("position_ms", position_ms)])
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

pub async fn volume(client: &Client, token: &str, percent: u32) -> Res<()> {
    let res = client
        .put(player_url("/volume"))
        .bearer_auth(token)
        .query(&[("volume_percent", percent)])
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

pub async fn shuffle(client: &Client, token: &str, state: bool) -> Res<()> {
    let res = client
        .put(player_url("/shuffle"))
        .bearer_auth(token)
        .query(&[("state", state)])
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

/// `state` is the wire value: `off`, `track` or `context`.
pub async fn repeat(client: &Client, token: &str, state: &str) -> Res<()> {
    let res = client
        .put(player_url("/repeat"))
        .bearer_auth(token)
        .query(&[("state", state)])
        .header(CONTENT_LENGTH, 0)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

pub async fn devices(client: &Client, token: &str) -> Res<Vec<Device>> {
    let res = client
        .get(player_url("/devices"))
        .bearer_auth(token)
        .send()
        .await?;
    let res = check(res).await?.json::<DevicesResponse>().await?;
    Ok(res.devices)
}

pub async fn transfer(client: &Client, token: &str, device_id: &str, play: bool) -> Res<()> {
    let body = TransferRequest {
        device_ids: vec![device_id.to_string()],
        play,
    };
    let res = client
        .put(player_url(""))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    check(res).await?;
    Ok(())
}

pub async fn state(client: &Client, token: &str) -> Res<Option<PlayerState>> {
    let res = client.get(player_url("")).bearer_auth(token).send().await?;
    let res = check(res).await?;
    if res.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    Ok(Some(res.json::<PlayerState>().await?))
}

pub async fn currently_playing(client: &Client, token: &str) -> Res<Option<CurrentlyPlaying>> {
    let res = client
        .get(player_url("/currently-playing"))
        .bearer_auth(token)
        .send()
        .await?;
    let res = check(res).await?;
    if res.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    Ok(Some(res.json::<CurrentlyPlaying>().await?))
}
