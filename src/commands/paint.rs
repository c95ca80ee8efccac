use std::path::PathBuf;
use std::process::ExitCode;

use ruio_lib::dom::snapshot::{node_key, snapshot_from_document};
use ruio_lib::{Config, PaintOutput, Painter, RuioOutput, RUIO_OUTPUT_VERSION};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::pipeline::{keys, load_document, resolve_root};
use crate::settings::{format_effective_config, load_config, resolve_depth};

/// Run the paint command.
#[allow(clippy::too_many_arguments)]
pub fn run_paint(
    config_path: Option<PathBuf>,
    dom: PathBuf,
    root: Option<String>,
    depth: Option<i64>,
    disable: bool,
    include_dom: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config: Config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let depth = resolve_depth(depth, &config);
    tracing::debug!("{}", format_effective_config(&config, depth, config_path.as_deref()));

    let mut document = match load_document(&dom) {
        Ok(document) => document,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let root = match resolve_root(&document, root.as_deref()) {
        Ok(root) => root,
        Err(err) => return render_error(err, format, output.as_deref()),
    };

    let painter = config.painter();
    let report = painter.paint(&mut document, Some(root), depth.get(), !disable);
    tracing::info!(
        root = %root,
        bordered = report.bordered.len(),
        applied = report.applied,
        cleared = report.cleared,
        "paint finished"
    );

    let body = RuioOutput::Paint(PaintOutput {
        version: RUIO_OUTPUT_VERSION.to_string(),
        root: node_key(&document, root),
        depth: depth.get(),
        enabled: !disable,
        bordered: keys(&document, &report.bordered),
        applied: report.applied,
        cleared: report.cleared,
        dom: include_dom.then(|| snapshot_from_document(&document)),
    });

    if let Err(err) = write_output(&body, format, output.as_deref()) {
        return render_error(err, format, output.as_deref());
    }
    ExitCode::SUCCESS
}
