use std::path::PathBuf;
use std::process::ExitCode;

use ruio_lib::dom::snapshot::node_key;
use ruio_lib::{
    EventRecord, Orchestrator, PickOutcome, PickOutput, RuioError, RuioOutput, SelectMode,
    RUIO_OUTPUT_VERSION,
};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_pick, render_error, write_output};
use crate::pipeline::{keys, load_document, load_events, resolve_root};
use crate::settings::{format_effective_config, load_config, resolve_depth};

/// Run the pick command: mount, enable borders, enter select mode, replay the script.
#[allow(clippy::too_many_arguments)]
pub fn run_pick(
    config_path: Option<PathBuf>,
    dom: PathBuf,
    events: PathBuf,
    root: Option<String>,
    depth: Option<i64>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let depth = resolve_depth(depth, &config);
    tracing::debug!("{}", format_effective_config(&config, depth, config_path.as_deref()));

    let document = match load_document(&dom) {
        Ok(document) => document,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let script = match load_events(&events) {
        Ok(script) => script,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let root = match resolve_root(&document, root.as_deref()) {
        Ok(root) => root,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let document = document.into_shared();

    let (records, selected, bordered) = {
        let mut overlay = Orchestrator::mount(document.clone(), root, &config);
        overlay.set_depth(i64::from(depth.get()));
        overlay.set_borders_enabled(true);
        if overlay.select_element_mode() != SelectMode::Started {
            return render_error(
                RuioError::Config("select mode could not be started".to_string()),
                format,
                output.as_deref(),
            );
        }

        let mut records = Vec::with_capacity(script.len());
        for event in &script {
            let outcome = overlay.dispatch(event);
            let element = match outcome {
                PickOutcome::Hovered { current, .. } => current,
                PickOutcome::Selected(element) => Some(element),
                _ => None,
            };
            records.push(EventRecord {
                event: event.clone(),
                outcome: outcome.into(),
                element: element.map(|id| node_key(&document.borrow(), id)),
            });
        }
        if overlay.select_mode_active() {
            tracing::warn!("event script ended with the picking session still active");
        }

        let selected = overlay.selected_element();
        let bordered = keys(&document.borrow(), &overlay.last_paint().bordered);
        (records, selected, bordered)
    };

    let document = document.borrow();
    let body = RuioOutput::Pick(PickOutput {
        version: RUIO_OUTPUT_VERSION.to_string(),
        root: node_key(&document, root),
        depth: depth.get(),
        selected: selected.map(|id| node_key(&document, id)),
        events: records,
        listeners_after_teardown: document.listener_count(),
        bordered,
    });

    if let Err(err) = write_output(&body, format, output.as_deref()) {
        return render_error(err, format, output.as_deref());
    }
    exit_code_for_pick(selected.is_some())
}
