mod common;

use common::*;
use spotcon::{
    CliError,
    cli::Flow,
    types::{Kind, RepeatMode, Shape},
};

#[tokio::test]
async fn test_pause_twice_is_not_an_error() {
    let mut d = dispatcher(RecordingGateway::new());

    assert_eq!(d.dispatch("pause").await.unwrap(), Flow::Continue);
    assert_eq!(d.dispatch("pp").await.unwrap(), Flow::Continue);

    assert_eq!(d.session().gateway.count(&Call::Pause), 2);
}

#[tokio::test]
async fn test_search_then_play_by_number() {
    let mut d = dispatcher(RecordingGateway::new().with_catalogue(catalogue()));

    d.dispatch("search --track Yesterday").await.unwrap();

    let cached = d.session().cache.last().expect("search fills the cache");
    assert_eq!(cached.tracks.len(), 3);
    assert!(cached.albums.is_empty());

    d.dispatch("play 1").await.unwrap();

    let plays: Vec<_> = d
        .session()
        .gateway
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Play { reference, .. } => Some(reference.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(plays.len(), 1);

    let reference = plays[0].clone().expect("play carries a reference");
    assert_eq!(reference.uri, "spotify:track:yesterday");
    assert_eq!(reference.shape, Shape::Track);
    assert_eq!(
        reference.to_play_request().uris,
        Some(vec!["spotify:track:yesterday".to_string()])
    );

    // The ordinal came from the cache, so only the explicit search hit the API.
    assert_eq!(d.session().gateway.searches(), 1);
}

#[tokio::test]
async fn test_search_without_filter_asks_for_every_kind() {
    let mut d = dispatcher(RecordingGateway::new().with_catalogue(catalogue()));

    d.dispatch("s beatles").await.unwrap();

    assert!(matches!(
        &d.session().gateway.calls[0],
        Call::Search { query, kinds, .. } if query == "beatles" && kinds.len() == 4
    ));
}

#[tokio::test]
async fn test_play_with_ordinal_before_any_search() {
    let mut d = dispatcher(RecordingGateway::new());

    let err = d.dispatch("play 2").await.unwrap_err();
    assert!(matches!(err, CliError::NoSearchResults));
    assert!(d.session().gateway.calls.is_empty());
}

#[tokio::test]
async fn test_play_album_by_number_plays_context() {
    let mut d = dispatcher(RecordingGateway::new().with_catalogue(catalogue()));

    d.dispatch("search beatles").await.unwrap();
    d.dispatch("play --album 1").await.unwrap();

    let last = d.session().gateway.calls.last().cloned();
    match last {
        Some(Call::Play {
            reference: Some(reference),
            ..
        }) => {
            assert_eq!(reference.shape, Shape::Context);
            assert_eq!(reference.uri, "spotify:album:help!");
        }
        other => panic!("expected a play call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_play_without_text_resumes() {
    let mut d = dispatcher(RecordingGateway::new());

    d.dispatch("p").await.unwrap();

    assert_eq!(
        d.session().gateway.calls,
        vec![Call::Play {
            device_id: None,
            reference: None
        }]
    );
}

#[tokio::test]
async fn test_play_on_device_by_number_transfers() {
    let gateway = RecordingGateway::new().with_devices(vec![
        device("dev-1", "Desk", true, 40),
        device("dev-2", "Kitchen", false, 70),
    ]);
    let mut d = dispatcher(gateway);

    d.dispatch("play --device 2").await.unwrap();
    d.dispatch("play -d kitchen").await.unwrap();

    assert_eq!(
        d.session().gateway.count(&Call::Transfer("dev-2".to_string(), true)),
        2
    );
}

#[tokio::test]
async fn test_play_on_unknown_device() {
    let gateway = RecordingGateway::new().with_devices(vec![device("dev-1", "Desk", true, 40)]);
    let mut d = dispatcher(gateway);

    let err = d.dispatch("play --device Garage").await.unwrap_err();
    assert!(err.is_usage());
}

#[tokio::test]
async fn test_play_rejects_two_kinds() {
    let mut d = dispatcher(RecordingGateway::new());

    let err = d.dispatch("play --track --album help").await.unwrap_err();
    assert!(err.is_usage());
    assert!(d.session().gateway.calls.is_empty());
}

#[tokio::test]
async fn test_play_quoted_name_from_saved_artists() {
    let gateway = RecordingGateway::new().with_saved(
        Kind::Artist,
        vec![spotcon::types::Item::Artist(artist("Bad Blood"))],
    );
    let mut d = dispatcher(gateway);

    d.dispatch("play \"bad blood\" --artist").await.unwrap();

    assert_eq!(d.session().gateway.searches(), 0);
    assert!(d.session().gateway.calls.iter().any(|c| matches!(
        c,
        Call::Play { reference: Some(r), .. } if r.uri == "spotify:artist:bad-blood"
    )));
}

#[tokio::test]
async fn test_vol_set_is_clamped() {
    let mut d = dispatcher(RecordingGateway::new());

    d.dispatch("vol set 150").await.unwrap();
    d.dispatch("vol set -20").await.unwrap();
    d.dispatch("v --set 42").await.unwrap();

    assert_eq!(
        d.session().gateway.calls,
        vec![
            Call::SetVolume(100),
            Call::SetVolume(0),
            Call::SetVolume(42)
        ]
    );
}

#[tokio::test]
async fn test_vol_up_and_down_are_relative() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    d.dispatch("vol up").await.unwrap();
    d.dispatch("vol down 70").await.unwrap();
    d.dispatch("vol --up 25").await.unwrap();

    let volumes: Vec<_> = d
        .session()
        .gateway
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::SetVolume(v) => Some(*v),
            _ => None,
        })
        .collect();
    assert_eq!(volumes, vec![60, 0, 75]);
}

#[tokio::test]
async fn test_vol_rejects_two_modes() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    let err = d.dispatch("vol --up --down").await.unwrap_err();
    assert!(err.is_usage());

    let err = d.dispatch("vol sideways").await.unwrap_err();
    assert!(err.is_usage());
}

#[tokio::test]
async fn test_vol_huge_step_saturates() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    d.dispatch("vol up 9223372036854775807").await.unwrap();
    d.dispatch("vol down 9223372036854775807").await.unwrap();

    assert_eq!(
        d.session()
            .gateway
            .calls
            .iter()
            .filter(|c| matches!(c, Call::SetVolume(_)))
            .collect::<Vec<_>>(),
        vec![&Call::SetVolume(100), &Call::SetVolume(0)]
    );
}

#[tokio::test]
async fn test_vol_rejects_negative_steps() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    assert!(d.dispatch("vol down -20").await.unwrap_err().is_usage());
    assert!(d.dispatch("vol up -5").await.unwrap_err().is_usage());
    assert!(d.dispatch("vol --up -5").await.unwrap_err().is_usage());

    assert!(
        !d.session()
            .gateway
            .calls
            .iter()
            .any(|c| matches!(c, Call::SetVolume(_)))
    );
}

#[tokio::test]
async fn test_vol_without_device_reports_no_active_device() {
    let mut d = dispatcher(RecordingGateway::new());

    let err = d.dispatch("vol").await.unwrap_err();
    assert!(matches!(err, CliError::NoActiveDevice));
}

#[tokio::test]
async fn test_repeat_playlist_uses_context_on_the_wire() {
    let mut d = dispatcher(RecordingGateway::new());

    d.dispatch("repeat playlist").await.unwrap();

    assert_eq!(
        d.session().gateway.calls,
        vec![Call::SetRepeat(RepeatMode::Playlist)]
    );
    assert_eq!(RepeatMode::Playlist.as_wire(), "context");
}

#[tokio::test]
async fn test_shuffle_is_case_insensitive() {
    let mut d = dispatcher(RecordingGateway::new());

    d.dispatch("shuffle ON").await.unwrap();
    d.dispatch("shuffle off").await.unwrap();

    assert_eq!(
        d.session().gateway.calls,
        vec![Call::SetShuffle(true), Call::SetShuffle(false)]
    );
}

#[tokio::test]
async fn test_extra_words_are_rejected_before_any_call() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    for line in ["repeat off track", "shuffle on off", "help play pause", "vol up 5 6"] {
        let err = d.dispatch(line).await.unwrap_err();
        assert!(err.is_usage(), "{line} should be a usage error, got {err:?}");
    }

    assert!(d.session().gateway.calls.is_empty());
}

#[tokio::test]
async fn test_commands_without_arguments_parse() {
    let mut d = dispatcher(RecordingGateway::new());

    d.dispatch("next").await.unwrap();
    d.dispatch("prev").await.unwrap();
    assert!(d.dispatch("pause extra").await.unwrap_err().is_usage());

    assert_eq!(d.session().gateway.calls, vec![Call::Next, Call::Previous]);
}

#[tokio::test]
async fn test_opt_sets_both_options() {
    let mut d = dispatcher(RecordingGateway::new());

    d.dispatch("opt --shuffle on --repeat track").await.unwrap();

    assert_eq!(
        d.session().gateway.calls,
        vec![Call::SetShuffle(true), Call::SetRepeat(RepeatMode::Track)]
    );
}

#[tokio::test]
async fn test_opt_without_flags_reads_state() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    d.dispatch("o").await.unwrap();

    assert_eq!(d.session().gateway.calls, vec![Call::PlayerState]);
}

#[tokio::test]
async fn test_seek_is_clamped_to_track() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    d.dispatch("seek ff 10").await.unwrap();
    d.dispatch("seek rw").await.unwrap();
    d.dispatch("seek ff 999").await.unwrap();

    let seeks: Vec<_> = d
        .session()
        .gateway
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Seek(ms) => Some(*ms),
            _ => None,
        })
        .collect();
    assert_eq!(seeks, vec![15_000, 0, 200_000]);
}

#[tokio::test]
async fn test_seek_needs_a_direction() {
    let mut d = dispatcher(RecordingGateway::new().with_state(playing_state(50)));

    assert!(d.dispatch("seek").await.unwrap_err().is_usage());
    assert!(d.dispatch("seek up").await.unwrap_err().is_usage());
    assert!(d.dispatch("seek ff soon").await.unwrap_err().is_usage());
}

#[tokio::test]
async fn test_gateway_errors_do_not_stop_the_loop() {
    let mut gateway = RecordingGateway::new();
    gateway.fail_with_no_device = true;
    let mut d = dispatcher(gateway);

    assert!(matches!(
        d.dispatch("next").await.unwrap_err(),
        CliError::NoActiveDevice
    ));
    assert_eq!(d.execute_line("next").await, Flow::Continue);
}

#[tokio::test]
async fn test_unknown_command_continues() {
    let mut d = dispatcher(RecordingGateway::new());

    assert!(matches!(
        d.dispatch("dance").await.unwrap_err(),
        CliError::UnknownCommand(name) if name == "dance"
    ));
    assert_eq!(d.execute_line("dance").await, Flow::Continue);
}

#[tokio::test]
async fn test_blank_line_does_nothing() {
    let mut d = dispatcher(RecordingGateway::new());

    assert_eq!(d.dispatch("   ").await.unwrap(), Flow::Continue);
    assert!(d.session().gateway.calls.is_empty());
}

#[tokio::test]
async fn test_quit_and_alias() {
    let mut d = dispatcher(RecordingGateway::new());

    assert_eq!(d.dispatch("quit").await.unwrap(), Flow::Quit);
    assert_eq!(d.execute_line("q").await, Flow::Quit);
}

#[tokio::test]
async fn test_help_flag_does_not_run_the_command() {
    let mut d = dispatcher(RecordingGateway::new());

    assert_eq!(d.dispatch("pause --help").await.unwrap(), Flow::Continue);
    assert!(d.session().gateway.calls.is_empty());
}

#[tokio::test]
async fn test_single_shot_arguments() {
    let mut d = dispatcher(RecordingGateway::new());
    let argv: Vec<String> = ["/usr/local/bin/spotcon", "next"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(d.execute_args(&argv).await, Flow::Continue);
    assert_eq!(d.session().gateway.calls, vec![Call::Next]);
}

#[tokio::test]
async fn test_current_and_devices() {
    let gateway = RecordingGateway::new().with_devices(vec![device("dev-1", "Desk", true, 40)]);
    let mut d = dispatcher(gateway);

    d.dispatch("c").await.unwrap();
    d.dispatch("d").await.unwrap();

    assert_eq!(
        d.session().gateway.calls,
        vec![Call::CurrentlyPlaying, Call::Devices]
    );
}
