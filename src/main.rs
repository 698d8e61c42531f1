use report_compare::app::ReportCompareApp;
use report_compare::config::Config;
use report_compare::constant;
use report_compare::document::ReportDocument;
use report_compare::ui;
use std::path::PathBuf;

/// Read a report file, treating a missing argument or unreadable file as empty.
fn read_report(path: Option<PathBuf>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        tracing::error!("Failed to read {:?}: {}", path, e);
        String::new()
    })
}

fn main() -> eframe::Result {
    // the log level lives in the config, so loading it logs at the default level
    let config =
        tracing::subscriber::with_default(tracing_subscriber::fmt().finish(), Config::default);

    tracing_subscriber::fmt()
        .with_max_level(config.settings.log_level())
        .init();

    // report-compare <original> [edited]
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let original = read_report(args.next());
    let edited = match args.next() {
        Some(path) => read_report(Some(path)),
        None => original.clone(),
    };
    let document = ReportDocument::new(original, edited);

    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(ReportCompareApp::new(cc, config, document)))),
    )
}
