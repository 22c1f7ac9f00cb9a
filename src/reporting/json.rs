use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::Summary;
use crate::infra::t;

/// Writes `summary` as pretty-printed JSON to `output_path`.
pub fn write_json_report(summary: &Summary, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(output_path, json)
        .with_context(|| t!("report.write_failed", path = output_path.display()))?;
    Ok(())
}
