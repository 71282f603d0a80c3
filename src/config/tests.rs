use tempfile::tempdir;

use super::loader::load_config_file;
use super::types::{PortMapEntry, StreamConfig};
use super::validate::{MAX_FRAME_SIZE, build_profile, select_stream};
use super::{ConfigFile, resolve_options};

use crate::args::{OutputFormat, StatArgs};
use crate::stats::{PortId, StreamId};

fn base_args() -> StatArgs {
    StatArgs {
        config: None,
        snapshots: None,
        stream: None,
        interval_ms: None,
        output: None,
        output_format: None,
        verbose: false,
    }
}

fn stream(stream_id: u32, frame_size: u32) -> StreamConfig {
    StreamConfig {
        stream_id,
        frame_size,
    }
}

fn pair(tx_port: u32, rx_port: u32) -> PortMapEntry {
    PortMapEntry { tx_port, rx_port }
}

#[test]
fn parse_toml_config_with_topology() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tgstat.toml");
    let content = r#"
snapshots = "feed.jsonl"
interval_ms = 500
output_format = "json"

[[streams]]
stream_id = 5
frame_size = 64

[[streams]]
stream_id = 6
frame_size = 1518

[[port_mapping]]
tx_port = 1
rx_port = 2

[sinks.prometheus]
path = "metrics.prom"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.snapshots.as_deref() != Some("feed.jsonl") {
        return Err("Unexpected snapshots source".to_owned());
    }
    if config.interval_ms != Some(500) {
        return Err("Unexpected interval".to_owned());
    }
    if config.output_format != Some(OutputFormat::Json) {
        return Err("Unexpected output format".to_owned());
    }
    let streams = match config.streams {
        Some(streams) => streams,
        None => return Err("Expected streams".to_owned()),
    };
    if streams.len() != 2 {
        return Err(format!("Expected 2 streams, got {}", streams.len()));
    }
    let first = match streams.first() {
        Some(first) => first,
        None => return Err("Missing stream".to_owned()),
    };
    if first.stream_id != 5 || first.frame_size != 64 {
        return Err("Unexpected first stream".to_owned());
    }
    if config.sinks.and_then(|sinks| sinks.prometheus).is_none() {
        return Err("Expected prometheus sink".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config_with_topology() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tgstat.json");
    let content = r#"{
  "snapshots": "feed.jsonl",
  "streams": [ { "stream_id": 5, "frame_size": 64 } ],
  "port_mapping": [ { "tx_port": 1, "rx_port": 2 } ]
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.snapshots.as_deref() != Some("feed.jsonl") {
        return Err("Unexpected snapshots source".to_owned());
    }
    let mapping = match config.port_mapping {
        Some(mapping) => mapping,
        None => return Err("Expected port mapping".to_owned()),
    };
    let first = match mapping.first() {
        Some(first) => first,
        None => return Err("Missing mapping entry".to_owned()),
    };
    if first.tx_port != 1 || first.rx_port != 2 {
        return Err("Unexpected mapping entry".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tgstat.yaml");
    std::fs::write(&path, "snapshots: feed").map_err(|err| format!("write failed: {}", err))?;

    if load_config_file(&path).is_ok() {
        return Err("Expected unsupported-extension error".to_owned());
    }
    Ok(())
}

#[test]
fn build_profile_accepts_valid_topology() -> Result<(), String> {
    let profile = build_profile(
        &[stream(5, 64), stream(6, MAX_FRAME_SIZE)],
        &[pair(1, 2), pair(3, 4)],
    )
    .map_err(|err| format!("unexpected error: {}", err))?;

    if profile.streams.len() != 2 {
        return Err(format!("Expected 2 streams, got {}", profile.streams.len()));
    }
    if profile.mapping.len() != 2 {
        return Err(format!(
            "Expected 2 mapping entries, got {}",
            profile.mapping.len()
        ));
    }
    let rx_ports: Vec<PortId> = profile.mapping.rx_ports().collect();
    if rx_ports != vec![PortId(2), PortId(4)] {
        return Err(format!("Unexpected rx ports: {:?}", rx_ports));
    }
    Ok(())
}

#[test]
fn build_profile_rejects_empty_streams() -> Result<(), String> {
    if build_profile(&[], &[pair(1, 2)]).is_ok() {
        return Err("Expected empty-streams error".to_owned());
    }
    Ok(())
}

#[test]
fn build_profile_rejects_duplicate_stream_id() -> Result<(), String> {
    if build_profile(&[stream(5, 64), stream(5, 128)], &[pair(1, 2)]).is_ok() {
        return Err("Expected duplicate-stream error".to_owned());
    }
    Ok(())
}

#[test]
fn build_profile_rejects_zero_frame_size() -> Result<(), String> {
    let err = match build_profile(&[stream(5, 0)], &[pair(1, 2)]) {
        Ok(_) => return Err("Expected zero-frame-size error".to_owned()),
        Err(err) => err,
    };
    let rendered = format!("{}", err);
    if !rendered.contains("Invalid frame size for stream #5") {
        return Err(format!("Unexpected error message: {}", rendered));
    }
    Ok(())
}

#[test]
fn build_profile_rejects_oversized_frame() -> Result<(), String> {
    if build_profile(&[stream(5, MAX_FRAME_SIZE.saturating_add(1))], &[pair(1, 2)]).is_ok() {
        return Err("Expected oversized-frame error".to_owned());
    }
    Ok(())
}

#[test]
fn build_profile_rejects_empty_mapping() -> Result<(), String> {
    if build_profile(&[stream(5, 64)], &[]).is_ok() {
        return Err("Expected empty-mapping error".to_owned());
    }
    Ok(())
}

#[test]
fn build_profile_rejects_duplicate_tx_port() -> Result<(), String> {
    if build_profile(&[stream(5, 64)], &[pair(1, 2), pair(1, 4)]).is_ok() {
        return Err("Expected duplicate-tx-port error".to_owned());
    }
    Ok(())
}

#[test]
fn select_stream_filters_profile() -> Result<(), String> {
    let profile = build_profile(&[stream(5, 64), stream(6, 128)], &[pair(1, 2)])
        .map_err(|err| format!("unexpected error: {}", err))?;
    let selected =
        select_stream(profile, 6).map_err(|err| format!("unexpected error: {}", err))?;
    let only = match selected.streams.as_slice() {
        [only] => only,
        unexpected => return Err(format!("Expected one stream, got {}", unexpected.len())),
    };
    if only.stream_id != StreamId(6) {
        return Err(format!("Unexpected stream id {}", only.stream_id));
    }
    Ok(())
}

#[test]
fn select_stream_rejects_unknown_id() -> Result<(), String> {
    let profile = build_profile(&[stream(5, 64)], &[pair(1, 2)])
        .map_err(|err| format!("unexpected error: {}", err))?;
    if select_stream(profile, 9).is_ok() {
        return Err("Expected unknown-stream error".to_owned());
    }
    Ok(())
}

#[test]
fn resolve_options_merges_cli_over_config() -> Result<(), String> {
    let config = ConfigFile {
        snapshots: Some("config-feed.jsonl".to_owned()),
        interval_ms: Some(250),
        output_format: Some(OutputFormat::Text),
        streams: Some(vec![stream(5, 64)]),
        port_mapping: Some(vec![pair(1, 2)]),
        ..ConfigFile::default()
    };
    let mut args = base_args();
    args.snapshots = Some("cli-feed.jsonl".to_owned());
    args.output_format = Some(OutputFormat::Json);

    let options =
        resolve_options(&args, Some(config)).map_err(|err| format!("resolve failed: {}", err))?;
    if format!("{}", options.source) != "cli-feed.jsonl" {
        return Err(format!("Expected CLI source to win, got {}", options.source));
    }
    if options.output_format != OutputFormat::Json {
        return Err("Expected CLI output format to win".to_owned());
    }
    if options.interval != Some(std::time::Duration::from_millis(250)) {
        return Err(format!("Unexpected interval: {:?}", options.interval));
    }
    Ok(())
}

#[test]
fn resolve_options_requires_snapshot_source() -> Result<(), String> {
    let config = ConfigFile {
        streams: Some(vec![stream(5, 64)]),
        port_mapping: Some(vec![pair(1, 2)]),
        ..ConfigFile::default()
    };
    if resolve_options(&base_args(), Some(config)).is_ok() {
        return Err("Expected missing-source error".to_owned());
    }
    Ok(())
}

#[test]
fn resolve_options_rejects_zero_config_interval() -> Result<(), String> {
    let config = ConfigFile {
        snapshots: Some("feed.jsonl".to_owned()),
        interval_ms: Some(0),
        streams: Some(vec![stream(5, 64)]),
        port_mapping: Some(vec![pair(1, 2)]),
        ..ConfigFile::default()
    };
    if resolve_options(&base_args(), Some(config)).is_ok() {
        return Err("Expected zero-interval error".to_owned());
    }
    Ok(())
}
