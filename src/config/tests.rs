use super::{apply_config, find_default_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::TesterArgs;

fn parse_with_config(cli: &[&str], config: &ConfigFile) -> Result<TesterArgs, String> {
    let matches = TesterArgs::command()
        .try_get_matches_from(cli.iter().copied())
        .map_err(|err| format!("parse failed: {}", err))?;
    let mut args =
        TesterArgs::from_arg_matches(&matches).map_err(|err| format!("args failed: {}", err))?;
    apply_config(&mut args, &matches, config).map_err(|err| err.to_string())?;
    Ok(args)
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tickload.toml");
    let content = r#"
url = "http://localhost:3000"
duration = 5
rate = 20
headers = "Accept:application/json,X-Env:test"
tick_interval = "250ms"
deadline = 3
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.url.as_deref() != Some("http://localhost:3000") {
        return Err("Unexpected url".to_owned());
    }
    if config.duration != Some(5) {
        return Err("Unexpected duration".to_owned());
    }
    if config.rate != Some(20) {
        return Err("Unexpected rate".to_owned());
    }

    let args = parse_with_config(&["tickload"], &config)?;
    if args.target_url() != Some("http://localhost:3000") {
        return Err("Config url was not applied".to_owned());
    }
    if args.duration.get() != 5 || args.rate.get() != 20 {
        return Err("Config load shape was not applied".to_owned());
    }
    if args.headers.get("X-Env") != Some("test") {
        return Err("Config headers were not applied".to_owned());
    }
    if args.tick_interval != Duration::from_millis(250) {
        return Err(format!("Unexpected tick_interval: {:?}", args.tick_interval));
    }
    if args.deadline != Some(Duration::from_secs(3)) {
        return Err(format!("Unexpected deadline: {:?}", args.deadline));
    }
    Ok(())
}

#[test]
fn parse_json_config_with_header_list() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tickload.json");
    let content = r#"{
  "url": "http://localhost:3000",
  "requests": 50,
  "headers": ["Accept:text/plain", "X-Id:7"]
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let args = parse_with_config(&["tickload"], &config)?;
    match args.requests {
        Some(requests) if requests.get() == 50 => {}
        other => return Err(format!("Unexpected requests: {:?}", other)),
    }
    if args.headers.get("X-Id") != Some("7") {
        return Err("Config header list was not applied".to_owned());
    }
    Ok(())
}

#[test]
fn cli_values_override_config() -> Result<(), String> {
    let config = ConfigFile {
        url: Some("http://config".to_owned()),
        rate: Some(9),
        verbose: Some(true),
        ..ConfigFile::default()
    };
    let args = parse_with_config(&["tickload", "http://cli", "-c", "2"], &config)?;
    if args.target_url() != Some("http://cli") {
        return Err(format!("Unexpected url: {:?}", args.target_url()));
    }
    if args.rate.get() != 2 {
        return Err(format!("Unexpected rate: {}", args.rate.get()));
    }
    if !args.verbose {
        return Err("Expected config verbose to apply".to_owned());
    }
    Ok(())
}

#[test]
fn cli_duration_skips_config_requests() -> Result<(), String> {
    let config = ConfigFile {
        requests: Some(100),
        ..ConfigFile::default()
    };
    let args = parse_with_config(&["tickload", "http://cli", "-d", "2"], &config)?;
    if args.requests.is_some() {
        return Err("Expected config requests to be ignored".to_owned());
    }
    Ok(())
}

#[test]
fn config_duration_and_requests_conflict() -> Result<(), String> {
    let config = ConfigFile {
        duration: Some(3),
        requests: Some(10),
        ..ConfigFile::default()
    };
    if parse_with_config(&["tickload"], &config).is_ok() {
        return Err("Expected conflict error".to_owned());
    }
    Ok(())
}

#[test]
fn config_zero_rate_is_rejected() -> Result<(), String> {
    let config = ConfigFile {
        rate: Some(0),
        ..ConfigFile::default()
    };
    if parse_with_config(&["tickload"], &config).is_ok() {
        return Err("Expected zero rate to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn config_invalid_duration_is_rejected() -> Result<(), String> {
    let config = ConfigFile {
        tick_interval: Some(super::types::DurationValue::Text("fast".to_owned())),
        ..ConfigFile::default()
    };
    if parse_with_config(&["tickload"], &config).is_ok() {
        return Err("Expected invalid tick_interval to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tickload.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&path).is_ok() {
        return Err("Expected unsupported extension error".to_owned());
    }
    Ok(())
}

#[test]
fn unknown_field_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tickload.toml");
    std::fs::write(&path, "rps = 5\n").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&path).is_ok() {
        return Err("Expected unknown field error".to_owned());
    }
    Ok(())
}

#[test]
fn default_lookup_prefers_toml_over_json() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    if find_default_config(dir.path()).is_some() {
        return Err("Empty directory should have no default config".to_owned());
    }

    let json = dir.path().join("tickload.json");
    std::fs::write(&json, "{}").map_err(|err| format!("write failed: {}", err))?;
    if find_default_config(dir.path()).as_deref() != Some(json.as_path()) {
        return Err("Expected the json file to be found".to_owned());
    }

    let toml = dir.path().join("tickload.toml");
    std::fs::write(&toml, "").map_err(|err| format!("write failed: {}", err))?;
    if find_default_config(dir.path()).as_deref() != Some(toml.as_path()) {
        return Err("Expected the toml file to win".to_owned());
    }
    Ok(())
}

#[test]
fn extension_match_ignores_case() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("LOAD.TOML");
    std::fs::write(&path, "rate = 3\n").map_err(|err| format!("write failed: {}", err))?;
    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.rate != Some(3) {
        return Err(format!("Unexpected rate: {:?}", config.rate));
    }
    Ok(())
}
