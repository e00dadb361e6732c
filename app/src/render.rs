//! What the `meals` binary prints for a view, and the status it exits with.

use meals_core::View;

/// Exit status for a settled list (or an unsettled loading view).
pub const EXIT_OK: u8 = 0;
/// Exit status when the fetch settled with an error.
pub const EXIT_FETCH_FAILED: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    pub exit_code: u8,
}

/// Render `view` as text, or as tagged JSON when `json` is set.
pub fn render(view: &View, json: bool) -> Result<Rendered, serde_json::Error> {
    let output = if json {
        serde_json::to_string_pretty(view)?
    } else {
        view.to_string()
    };
    let exit_code = match view {
        View::Error { .. } => EXIT_FETCH_FAILED,
        View::Loading | View::List { .. } => EXIT_OK,
    };
    Ok(Rendered { output, exit_code })
}
