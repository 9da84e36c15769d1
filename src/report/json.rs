use super::aggregate::{self, Summary};
use super::types::TestRecord;
use crate::error::{ReportError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    #[serde(flatten)]
    summary: Summary,
    failures: Vec<JsonFailure<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonFailure<'a> {
    name: &'a str,
    error: &'a str,
}

/// Pretty JSON summary of a run; `None` when there are no records
pub fn summary_json(records: &[TestRecord]) -> Result<Option<String>> {
    let Some(summary) = aggregate::summary(records) else {
        return Ok(None);
    };

    let failures = aggregate::failed(records)
        .into_iter()
        .map(|r| JsonFailure {
            name: &r.name,
            error: r.error.as_deref().unwrap_or_default(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&JsonSummary { summary, failures }).map_err(
        |source| ReportError::Serialize {
            name: "summary".to_string(),
            source,
        },
    )?;
    Ok(Some(json))
}
