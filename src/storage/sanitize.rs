/// Reduces an untrusted filename to its final path component.
///
/// Both `/` and `\` count as separators so a name crafted for either platform
/// cannot walk out of the directory it is joined to. Returns `None` when
/// nothing usable is left (`""`, `"."`, `".."`, or a trailing separator).
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    match base {
        "" | "." | ".." => None,
        _ => Some(base.to_string()),
    }
}
