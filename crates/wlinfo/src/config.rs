// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use rune_cfg::RuneConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WlinfoConfig {
    /// `None` means no bound.
    pub max_outputs: Option<usize>,
    pub extended: bool,
    pub format: Format,
}

impl Default for WlinfoConfig {
    fn default() -> Self {
        Self {
            max_outputs: None,
            extended: true,
            format: Format::Text,
        }
    }
}

pub fn load(path: &Path) -> Result<WlinfoConfig, String> {
    if !path.exists() {
        return Ok(WlinfoConfig::default());
    }

    let rc = RuneConfig::from_file(path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<WlinfoConfig, String> {
    let mut cfg = WlinfoConfig::default();

    if !rc.has("wlinfo") {
        return Ok(cfg);
    }

    if let Some(s) = get_string(rc, "wlinfo.max_outputs")? {
        cfg.max_outputs =
            parse_max_outputs(&s).map_err(|e| format!("config error at wlinfo.max_outputs: {e}"))?;
    }

    if let Some(s) = get_string(rc, "wlinfo.extended")? {
        cfg.extended =
            parse_bool(&s).map_err(|e| format!("config error at wlinfo.extended: {e}"))?;
    }

    if let Some(s) = get_string(rc, "wlinfo.format")? {
        cfg.format = parse_format(&s).map_err(|e| format!("config error at wlinfo.format: {e}"))?;
    }

    Ok(cfg)
}

fn get_string(rc: &RuneConfig, key: &str) -> Result<Option<String>, String> {
    rc.get_optional::<String>(key)
        .map_err(|e| format!("config error at {key}: {e}"))
}

fn parse_max_outputs(s: &str) -> Result<Option<usize>, String> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("unlimited") {
        return Ok(None);
    }

    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".into()),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(format!("expected a positive integer or \"unlimited\", got \"{s}\"")),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected true|false, got \"{other}\"")),
    }
}

fn parse_format(s: &str) -> Result<Format, String> {
    match s.trim().to_lowercase().as_str() {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(format!("expected text|json, got \"{other}\"")),
    }
}
