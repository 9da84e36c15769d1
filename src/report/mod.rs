pub mod aggregate;
pub mod html;
pub mod json;
pub mod junit;
pub mod sauce;
pub mod store;
pub mod types;

use anyhow::Result;
use std::path::Path;

use sauce::SessionSigner;
use store::ReportStore;

/// Build a report from the store in the given format and write it out.
///
/// Returns `false` when no tests were recorded and nothing was written.
pub fn generate_report(
    store: &ReportStore,
    signer: &SessionSigner,
    format: &str,
    options: html::RenderOptions,
    output: Option<&Path>,
) -> Result<bool> {
    let records = store.load_all()?;
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let content = match format {
        "html" => html::render(&records, signer, options)?,
        "page" => html::render(&records, signer, options)?
            .map(|fragment| html::render_page(&fragment, &generated_at)),
        "json" => json::summary_json(&records)?,
        "junit" if records.is_empty() => None,
        "junit" => Some(junit::generate_junit_xml(&records, &generated_at)?),
        _ => anyhow::bail!("Unknown format: {}", format),
    };

    match content {
        Some(content) => {
            emit(&content, format, output)?;
            Ok(true)
        }
        None => {
            log::warn!("No test records in {}", store.dir().display());
            Ok(false)
        }
    }
}

fn emit(content: &str, format: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("{} report saved to: {}", format.to_uppercase(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
