use crate::config::options::{is_binding, OptionMap};
use crate::error::App;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads `path` over the defaults. A missing file is created with the
/// defaults and is not an error.
pub fn load(path: &Path) -> Result<OptionMap, App> {
    let mut opts = OptionMap::defaults();
    if !path.exists() {
        info!("No config at {}, writing defaults", path.display());
        save(path, &opts)?;
        return Ok(opts);
    }

    let content = fs::read_to_string(path)?;
    merge(&mut opts, &content);
    Ok(opts)
}

/// Applies `key = value` lines to `opts`. Section headers, comments and
/// names outside the default table are skipped.
pub fn merge(opts: &mut OptionMap, content: &str) {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            continue;
        }
        let Some(split) = line.find(['=', ':']) else {
            debug!("Skipping config line without a value: {line}");
            continue;
        };
        let name = line[..split].trim().to_ascii_lowercase();
        let value = decode_value(line[split + 1..].trim());
        if !opts.set(&name, value) {
            debug!("Ignoring unknown option {name}");
        }
    }
}

/// Values that would not survive trimming or line splitting are written as a
/// JSON string literal.
fn encode_value(value: &str) -> String {
    let plain = value == value.trim()
        && !value.starts_with('"')
        && !value.chars().any(char::is_control);
    if plain {
        value.to_string()
    } else {
        serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
    }
}

fn decode_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        if let Ok(value) = serde_json::from_str::<String>(raw) {
            return value;
        }
    }
    raw.to_string()
}

/// General options first, a blank line, then the key bindings.
pub fn render(opts: &OptionMap) -> String {
    let mut out = String::new();
    for (name, value) in opts.iter().filter(|(name, _)| !is_binding(name)) {
        out.push_str(&format!("{name} = {}\n", encode_value(value)));
    }
    out.push('\n');
    for (name, value) in opts.iter().filter(|(name, _)| is_binding(name)) {
        out.push_str(&format!("{name} = {}\n", encode_value(value)));
    }
    out
}

/// Writes to a temporary sibling and renames it over `path`, so a failed
/// save leaves the previous file intact.
pub fn save(path: &Path, opts: &OptionMap) -> Result<(), App> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(render(opts).as_bytes())?;
    file.flush()?;
    file.persist(path)?;
    info!("Saved config to {}", path.display());
    Ok(())
}
