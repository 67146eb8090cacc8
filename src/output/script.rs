//! Script generation
//!
//! Renders the ranked features into a small Python script: a header comment,
//! a `main()` entry point with one `print` per feature, and a guarded call.

use crate::analysis::RankedFeatures;
use crate::HarvestError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SCRIPT_HEADER: &str = "# Auto-generated script based on analyzed features";
const INDENT: &str = "    ";

/// Formats ranked features as a Python script
///
/// Features appear in ranked order, one output line each. With no features
/// the entry point gets a `pass` body so the script still runs.
///
/// # Example
///
/// ```
/// use sumi_harvest::analysis::FrequencyAnalyzer;
/// use sumi_harvest::output::render_script;
///
/// let features = FrequencyAnalyzer::new().analyze(&["import os"]);
/// let script = render_script(&features);
/// assert!(script.contains("    print('Feature: import')\n"));
/// ```
pub fn render_script(features: &RankedFeatures) -> String {
    let mut script = String::new();

    script.push_str(SCRIPT_HEADER);
    script.push_str("\n\n");

    script.push_str("def main():\n");
    if features.is_empty() {
        script.push_str(&format!("{}pass\n", INDENT));
    }
    for feature in features {
        script.push_str(&format!("{}print('Feature: {}')\n", INDENT, feature.token));
    }

    script.push_str("\nif __name__ == '__main__':\n");
    script.push_str(&format!("{}main()\n", INDENT));

    script
}

/// Writes a rendered script to `output_path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the script
/// * `Err(HarvestError::Io)` - Failed to create or write the file
pub fn write_script(script: &str, output_path: &Path) -> Result<(), HarvestError> {
    let io_error = |source| HarvestError::Io {
        path: output_path.display().to_string(),
        source,
    };

    let mut file = File::create(output_path).map_err(io_error)?;
    file.write_all(script.as_bytes()).map_err(io_error)?;

    tracing::debug!("Wrote {} bytes to {}", script.len(), output_path.display());
    Ok(())
}
