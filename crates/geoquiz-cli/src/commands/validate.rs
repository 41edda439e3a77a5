//! The `geoquiz validate` command.

use anyhow::Result;

use geoquiz_core::dataset::validate_dataset;
use geoquiz_data::config::{create_source, DatasetConfig};
use geoquiz_data::load_dataset;

pub async fn execute(location: String) -> Result<()> {
    let source = create_source(&DatasetConfig::from_location(&location))?;
    let dataset = load_dataset(source.as_ref()).await?;

    println!("Dataset: {} ({} records)", source.describe(), dataset.len());

    let warnings = validate_dataset(&dataset);
    for w in &warnings {
        let prefix = w
            .record
            .map(|index| format!("  [record {index}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    let blocking = warnings.iter().filter(|w| w.blocks_generation()).count();
    if warnings.is_empty() {
        println!("Dataset valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
        if blocking > 0 {
            println!("Some question types cannot be generated from this dataset.");
        }
    }

    Ok(())
}
