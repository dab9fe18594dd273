//! Subcommand implementations

use crate::outline;
use anyhow::{anyhow, bail, Context, Result};
use layoupy_composition::{CompositionEvent, CompositionSession, Outcome, SessionConfig};
use layoupy_visibility::RadioIndex;
use std::fs;
use std::path::Path;

/// Load session configuration, or defaults when no file is given
pub(crate) fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SessionConfig::from_toml_str(&source).with_context(|| format!("parsing config {}", path.display()))
}

fn open_session(snapshot: &Path, config: SessionConfig) -> Result<CompositionSession> {
    let source = fs::read_to_string(snapshot)
        .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
    CompositionSession::from_snapshot_json(&source, config)
        .with_context(|| format!("loading snapshot {}", snapshot.display()))
}

/// Split `Name=Value`
fn parse_answer(raw: &str) -> Result<(&str, &str)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("answer '{raw}' is not Name=Value"))?;
    if name.is_empty() {
        bail!("answer '{raw}' has an empty radio name");
    }
    Ok((name, value))
}

/// Outline of `snapshot` after recording `answers` (by radio name)
pub(crate) fn inspect(snapshot: &Path, answers: &[String], config: SessionConfig) -> Result<String> {
    let mut session = open_session(snapshot, config)?;
    let index = RadioIndex::build(session.forest());
    for raw in answers {
        let (name, value) = parse_answer(raw)?;
        let radio_id = index
            .radio_id(name)
            .ok_or_else(|| anyhow!("no radio named '{name}'"))?;
        session.apply(CompositionEvent::SelectAnswer {
            radio_id,
            value: value.to_string(),
        })?;
    }
    Ok(outline::render(&session.view(), session.answers()))
}

/// Apply an event script to `snapshot`
///
/// Returns the per-event report and the resulting snapshot as JSON.
pub(crate) fn replay(snapshot: &Path, events: &Path, config: SessionConfig) -> Result<(String, String)> {
    let mut session = open_session(snapshot, config)?;
    let script = fs::read_to_string(events)
        .with_context(|| format!("reading events {}", events.display()))?;
    let events: Vec<CompositionEvent> =
        serde_json::from_str(&script).context("parsing event script")?;

    let mut report = String::new();
    for (n, event) in events.into_iter().enumerate() {
        let kind = event.kind();
        let outcome = session
            .apply(event)
            .with_context(|| format!("event {n} ({kind})"))?;
        let line = match outcome {
            Outcome::Changed(_) => format!("{n:>4} {kind}: changed\n"),
            Outcome::Unchanged(reason) => format!("{n:>4} {kind}: unchanged ({reason})\n"),
        };
        report.push_str(&line);
    }
    tracing::info!("Replayed {} events", session.journal().total_recorded());

    let json = session.snapshot().to_json_pretty()?;
    Ok((report, json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoupy_composition::ForestSnapshot;
    use layoupy_test_utils::{call_script, id};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn script_snapshot() -> NamedTempFile {
        write_temp(&ForestSnapshot::new(call_script()).to_json().unwrap())
    }

    #[test]
    fn answer_arguments() {
        assert_eq!(parse_answer("Plan=Plus").unwrap(), ("Plan", "Plus"));
        assert_eq!(parse_answer("Note=a=b").unwrap(), ("Note", "a=b"));
        assert!(parse_answer("Plan").is_err());
        assert!(parse_answer("=Plus").is_err());
    }

    #[test]
    fn inspect_resolves_radio_names() {
        let snapshot = script_snapshot();
        let text = inspect(
            snapshot.path(),
            &["AreYouAdult=Yes".to_string()],
            SessionConfig::default(),
        )
        .unwrap();
        assert!(text.contains("radio AreYouAdult (Yes|No) = Yes"));
        assert!(text.contains("section Adults [shown]"));
        assert!(text.contains("section Plans [hidden (unanswered)]"));
    }

    #[test]
    fn inspect_unknown_radio_fails() {
        let snapshot = script_snapshot();
        let err = inspect(snapshot.path(), &["Nope=Yes".to_string()], SessionConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("no radio named 'Nope'"));
    }

    #[test]
    fn replay_writes_resulting_snapshot() {
        let snapshot = script_snapshot();
        let events = write_temp(&format!(
            r#"[
                {{"event": "delete", "id": "{}"}},
                {{"event": "delete", "id": "{}"}},
                {{"event": "activate_stage", "id": "{}"}}
            ]"#,
            id(4),
            id(4),
            id(2)
        ));
        let (report, json) = replay(snapshot.path(), events.path(), SessionConfig::default()).unwrap();

        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("delete: changed"));
        assert!(lines[1].ends_with("delete: unchanged (target missing)"));

        let result = ForestSnapshot::from_json(&json).unwrap();
        assert_eq!(result.elements.total_len(), call_script().total_len() - 4);
    }

    #[test]
    fn config_file_is_applied() {
        let config = write_temp("answer_policy = \"strict\"\n");
        let config = load_config(Some(config.path())).unwrap();
        let snapshot = script_snapshot();
        assert!(inspect(snapshot.path(), &["Plan=Gold".to_string()], config).is_err());
    }
}
