/// Console host tests
/// Tests configuration loading and the simulated frame loop end to end
use mood_console::{Command, ConsoleConfig, ConsoleError, ConsoleHost, SimulationSettings};
use mood_playback::{
    Channel, CursorSharing, MediaAction, MetadataGate, MuteState, PlayState, PlaybackError,
    PlayerEvent,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn quick_config(metadata_frames: u32) -> ConsoleConfig {
    ConsoleConfig {
        simulation: SimulationSettings {
            frame_ms: 100,
            metadata_frames,
            track_duration_secs: 60.0,
            buffer_rate: 10.0,
            fast_seek: false,
        },
        ..Default::default()
    }
}

// ===== Configuration =====

/// Test a TOML file overrides player and simulation settings
#[test]
fn test_load_config_from_file() {
    let file = write_config(
        r#"
[player]
volume = 40
cursor_sharing = "per-channel"
seek_offset_secs = 5.0

[player.channels.epic]
name = "battle"
tracks = ["one.mp3", "two.mp3"]

[simulation]
frame_ms = 20
metadata_frames = 0
"#,
    );

    let config = ConsoleConfig::load(Some(file.path())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.player.volume, 40);
    assert_eq!(config.player.cursor_sharing, CursorSharing::PerChannel);
    assert_eq!(config.player.seek_offset_secs, 5.0);
    assert_eq!(config.player.channels.epic.name, "battle");
    assert_eq!(config.player.channels.epic.tracks.len(), 2);
    // Untouched channels keep their defaults
    assert_eq!(config.player.channels.cool.tracks.len(), 4);
    assert_eq!(config.simulation.frame_ms, 20);
    assert_eq!(config.simulation.metadata_frames, 0);
    assert_eq!(config.simulation.track_duration_secs, 180.0);
}

/// Test an explicit config path must exist
#[test]
fn test_missing_config_file_is_an_error() {
    let result = ConsoleConfig::load(Some(std::path::Path::new("/nonexistent/mood.toml")));
    assert!(matches!(result, Err(ConsoleError::Config(_))));
}

/// Test validation catches empty playlists and a zero frame length
#[test]
fn test_validate_rejects_bad_settings() {
    let mut config = ConsoleConfig::default();
    config.player.channels.reflex.tracks.clear();
    assert!(matches!(config.validate(), Err(ConsoleError::Config(_))));

    let mut config = ConsoleConfig::default();
    config.simulation.frame_ms = 0;
    assert!(config.validate().is_err());

    let mut config = ConsoleConfig::default();
    config.simulation.track_duration_secs = f64::NAN;
    assert!(config.validate().is_err());

    assert!(ConsoleConfig::default().validate().is_ok());
}

/// Test the default configuration survives a TOML round trip
#[test]
fn test_default_config_serializes_to_toml() {
    let text = toml::to_string_pretty(&ConsoleConfig::default()).unwrap();
    let file = write_config(&text);

    let config = ConsoleConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.player, ConsoleConfig::default().player);
}

/// Test host errors map to the config, command or playback variant
#[test]
fn test_error_variants() {
    assert!(matches!(
        "warp 9".parse::<Command>(),
        Err(ConsoleError::Command(_))
    ));
    assert!(matches!(
        ConsoleError::from(PlaybackError::NoTrackLoaded),
        ConsoleError::Playback(PlaybackError::NoTrackLoaded)
    ));
}

// ===== Frame loop =====

/// Test playback starts only once simulated metadata arrives
#[test]
fn test_metadata_arrives_after_configured_frames() {
    let mut host = ConsoleHost::new(quick_config(3)).unwrap();
    host.execute(Command::Next(Channel::Epic)).unwrap();

    let session = host.session();
    assert_eq!(session.play_state(), PlayState::Playing);
    assert_eq!(session.metadata_gate(), Some(MetadataGate::Pending));

    host.execute(Command::Frames(2)).unwrap();
    assert_eq!(host.session().metadata_gate(), Some(MetadataGate::Pending));

    host.execute(Command::Frames(1)).unwrap();
    assert_eq!(host.session().metadata_gate(), Some(MetadataGate::Open));
    assert_eq!(host.session().progress().duration(), "1:00");
    assert_eq!(host.frames(), 3);
}

/// Test the virtual clock drives the time display
#[test]
fn test_frames_advance_time_display() {
    let mut host = ConsoleHost::new(quick_config(0)).unwrap();
    host.execute(Command::Next(Channel::Cool)).unwrap();

    // 25 frames of 100ms
    host.execute(Command::Frames(25)).unwrap();
    assert_eq!(host.session().progress().current_time(), "0:02");

    let events = host.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, PlayerEvent::PositionUpdate { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, PlayerEvent::BufferedChanged { .. })));
}

/// Test pausing freezes the clock
#[test]
fn test_pause_freezes_position() {
    let mut host = ConsoleHost::new(quick_config(0)).unwrap();
    host.execute(Command::Next(Channel::Reflex)).unwrap();
    host.execute(Command::Frames(35)).unwrap();
    host.execute(Command::Play).unwrap();
    host.execute(Command::Frames(30)).unwrap();

    assert_eq!(host.session().play_state(), PlayState::Paused);
    assert_eq!(host.session().progress().current_time(), "0:03");
}

/// Test system stop and seeks go through the media bridge
#[test]
fn test_media_commands() {
    let mut host = ConsoleHost::new(quick_config(0)).unwrap();
    assert!(host.media().now_playing().unwrap().starts_with("Komorebi"));

    host.execute(Command::Next(Channel::Epic)).unwrap();
    host.execute(Command::Seek(30.0)).unwrap();
    assert_eq!(host.session().progress().current_time(), "0:30");

    host.execute(Command::Media(MediaAction::SeekBackward { offset: None }))
        .unwrap();
    assert_eq!(host.session().progress().current_time(), "0:20");

    host.execute(Command::Media(MediaAction::Stop)).unwrap();
    assert_eq!(host.session().play_state(), PlayState::Paused);
    assert_eq!(host.session().progress().current_time(), "0:00");
}

/// Test mute and volume carry over channel switches
#[test]
fn test_mute_carries_over_channel_switch() {
    let mut host = ConsoleHost::new(quick_config(0)).unwrap();
    host.execute(Command::Next(Channel::Epic)).unwrap();
    host.execute(Command::Mute).unwrap();
    host.execute(Command::Volume(25)).unwrap();
    host.execute(Command::Prev(Channel::Cool)).unwrap();

    let session = host.session();
    assert_eq!(session.mute_state(), MuteState::Muted);
    let handle = session.active_media().unwrap();
    assert!(mood_playback::MediaHandle::is_muted(handle));
    assert_eq!(handle.gain(), 0.25);
}

/// Test the status line reflects the display
#[test]
fn test_status_line() {
    let mut host = ConsoleHost::new(quick_config(0)).unwrap();
    assert!(host.status_line().contains("no track"));

    host.execute(Command::Next(Channel::Reflex)).unwrap();
    let status = host.status_line();
    assert!(status.contains("Playing"));
    assert!(status.contains("reflex playlist"));
    assert!(status.contains("/ 1:00"));
}
