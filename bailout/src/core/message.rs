//! Diagnostic messages shared by every raised bailout.

/// Format the message carried by configuration violations and dynamic-usage
/// aborts.
///
/// The `dynamic` fragment and the link suffix only appear when present.
pub fn format_error_message(reason: &str, dynamic: Option<&str>, link: Option<&str>) -> String {
    let mode = dynamic
        .map(|dynamic| format!(" with `dynamic = \"{}\"`", dynamic))
        .unwrap_or_default();
    let suffix = link
        .map(|link| format!(" See more info here: {}", link))
        .unwrap_or_default();
    format!(
        "Page{} couldn't be rendered statically because it used `{}`.{}",
        mode, reason, suffix
    )
}
