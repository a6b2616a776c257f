use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::models::ReshapedSchedule;

// Renders with 4-space indentation and keys sorted at every level.
pub fn render_json(schedule: &ReshapedSchedule) -> Result<String> {
    // serde_json's Map is a BTreeMap, so going through Value sorts struct fields too.
    let value: Value = serde_json::to_value(schedule).context("Failed to convert the schedule to JSON")?;

    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).context("Failed to serialize the schedule")?;

    String::from_utf8(buffer).context("Serialized schedule is not valid UTF-8")
}

// Overwrites the file in place; the parent directory must already exist.
pub fn write_schedule(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_schedule(path: &Path) -> Result<ReshapedSchedule> {
    let contents = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
