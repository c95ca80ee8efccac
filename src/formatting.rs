use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use ruio_lib::{ErrorOutput, OutcomeKind, RuioError, RuioOutput, RUIO_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Renders `body` and sends it to `output`, or to stdout when unset.
pub fn write_output(
    body: &RuioOutput,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), RuioError> {
    let interactive = output.is_none() && io::stdout().is_terminal();
    let content = render(body, format, interactive)?;
    emit(&content, output)
}

/// Reports a fatal error in the requested format. Always exit code 2.
pub fn render_error(err: RuioError, format: OutputFormat, output: Option<&Path>) -> ExitCode {
    tracing::error!(error = %err, "command failed");
    let payload = err.to_payload();
    let body = RuioOutput::Error(ErrorOutput {
        version: RUIO_OUTPUT_VERSION.to_string(),
        message: Some(payload.message.clone()),
        error: payload,
    });

    if let Err(write_err) = write_output(&body, format, output) {
        tracing::warn!(error = %write_err, "error report not written, falling back to stdout");
        if let Ok(content) = render(&body, OutputFormat::Json, false) {
            println!("{content}");
        }
    }
    ExitCode::from(2)
}

/// `Pretty` turns into text only on an interactive stdout; anywhere else it
/// is indented JSON.
fn render(body: &RuioOutput, format: OutputFormat, interactive: bool) -> Result<String, RuioError> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string(body)?,
        OutputFormat::Pretty if interactive => format_pretty(body, true),
        OutputFormat::Pretty => serde_json::to_string_pretty(body)?,
    };
    Ok(content)
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), RuioError> {
    match output {
        Some(path) => std::fs::write(path, content).map_err(|e| {
            RuioError::config(format!("Failed to write output {}: {e}", path.display()))
        }),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &RuioOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        RuioOutput::Paint(out) => {
            let header = color("[PAINT]", "36", colorize);
            let action = if out.enabled { "Borders applied" } else { "Borders cleared" };
            writeln!(buf, "{header} {action} under '{}' (depth {})", out.root, out.depth).ok();
            writeln!(buf, "Applied: {}, cleared: {}", out.applied, out.cleared).ok();
            if !out.bordered.is_empty() {
                writeln!(buf, "Bordered ({}):", out.bordered.len()).ok();
                for key in &out.bordered {
                    writeln!(buf, "- {key}").ok();
                }
            }
        }
        RuioOutput::Pick(out) => {
            let (status, code) = match &out.selected {
                Some(_) => ("SELECTED", "32"),
                None => ("NO SELECTION", "33"),
            };
            writeln!(buf, "{} Pick session over '{}'", color(status, code, colorize), out.root).ok();
            if let Some(selected) = &out.selected {
                writeln!(buf, "Selected: {selected}").ok();
            }
            if !out.events.is_empty() {
                writeln!(buf, "Events:").ok();
                for (index, record) in out.events.iter().enumerate() {
                    let outcome = color(
                        &format!("{:?}", record.outcome).to_ascii_lowercase(),
                        outcome_color_code(record.outcome),
                        colorize,
                    );
                    match &record.element {
                        Some(element) => writeln!(
                            buf,
                            "{:>3}. {} -> {outcome} ({element})",
                            index + 1,
                            record.event.kind()
                        ),
                        None => writeln!(buf, "{:>3}. {} -> {outcome}", index + 1, record.event.kind()),
                    }
                    .ok();
                }
            }
            writeln!(buf, "Listeners after teardown: {}", out.listeners_after_teardown).ok();
        }
        RuioOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn outcome_color_code(outcome: OutcomeKind) -> &'static str {
    match outcome {
        OutcomeKind::Selected => "32",
        OutcomeKind::Suppressed | OutcomeKind::Cancelled => "33",
        OutcomeKind::Hovered => "36",
        OutcomeKind::Ignored => "90",
    }
}

/// Determine exit code for the pick command.
pub fn exit_code_for_pick(selected: bool) -> ExitCode {
    if selected {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruio_lib::{DomEvent, EventRecord, PaintOutput, PickOutput};

    #[test]
    fn exit_code_for_pick_maps_selection() {
        assert_eq!(exit_code_for_pick(true), ExitCode::SUCCESS);
        assert_eq!(exit_code_for_pick(false), ExitCode::from(1));
    }

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("error.json");
        let code = render_error(
            RuioError::Config("boom".to_string()),
            OutputFormat::Json,
            Some(&path),
        );
        assert_eq!(code, ExitCode::from(2));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("\"mode\":\"error\""));
        assert!(written.contains("boom"));
    }

    #[test]
    fn render_error_survives_unwritable_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("error.json");
        let code = render_error(RuioError::snapshot("bad"), OutputFormat::Pretty, Some(&path));
        assert_eq!(code, ExitCode::from(2));
        assert!(!path.exists());
    }

    #[test]
    fn pretty_format_is_indented_json_outside_a_terminal() {
        let body = RuioOutput::Error(ErrorOutput {
            version: RUIO_OUTPUT_VERSION.to_string(),
            message: None,
            error: RuioError::config("boom").to_payload(),
        });
        let compact = render(&body, OutputFormat::Json, true).unwrap();
        assert!(!compact.contains('\n'));

        let indented = render(&body, OutputFormat::Pretty, false).unwrap();
        assert!(indented.contains('\n'));
        let parsed: RuioOutput = serde_json::from_str(&indented).unwrap();
        assert!(matches!(parsed, RuioOutput::Error(_)));

        let text = render(&body, OutputFormat::Pretty, true).unwrap();
        assert!(text.contains("boom"));
        assert!(serde_json::from_str::<RuioOutput>(&text).is_err());
    }

    #[test]
    fn write_output_reports_unwritable_destination() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let body = RuioOutput::Error(ErrorOutput {
            version: RUIO_OUTPUT_VERSION.to_string(),
            message: None,
            error: RuioError::config("boom").to_payload(),
        });
        let err = write_output(&body, OutputFormat::Json, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
    }

    #[test]
    fn format_pretty_lists_bordered_elements() {
        let output = RuioOutput::Paint(PaintOutput {
            version: RUIO_OUTPUT_VERSION.to_string(),
            root: "body".into(),
            depth: 2,
            enabled: true,
            bordered: vec!["body".into(), "main".into()],
            applied: 2,
            cleared: 1,
            dom: None,
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[PAINT] Borders applied under 'body' (depth 2)"));
        assert!(pretty.contains("Applied: 2, cleared: 1"));
        assert!(pretty.contains("- main"));
    }

    #[test]
    fn format_pretty_reports_pick_session() {
        let output = RuioOutput::Pick(PickOutput {
            version: RUIO_OUTPUT_VERSION.to_string(),
            root: "body".into(),
            depth: 1,
            selected: Some("item".into()),
            events: vec![
                EventRecord {
                    event: DomEvent::pointer_move(5.0, 5.0),
                    outcome: OutcomeKind::Hovered,
                    element: Some("item".into()),
                },
                EventRecord {
                    event: DomEvent::click(5.0, 5.0),
                    outcome: OutcomeKind::Selected,
                    element: Some("item".into()),
                },
            ],
            listeners_after_teardown: 0,
            bordered: vec!["item".into()],
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("SELECTED Pick session over 'body'"));
        assert!(pretty.contains("Selected: item"));
        assert!(pretty.contains("-> hovered (item)"));
        assert!(pretty.contains("-> selected (item)"));
        assert!(pretty.contains("Listeners after teardown: 0"));
    }

    #[test]
    fn format_pretty_renders_error_hint() {
        let payload = RuioError::snapshot("snapshot has no root node").to_payload();
        let output = RuioOutput::Error(ErrorOutput {
            version: RUIO_OUTPUT_VERSION.to_string(),
            message: None,
            error: payload,
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] snapshot has no root node"));
        assert!(pretty.contains("Hint:"));
    }
}
