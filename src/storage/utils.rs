use std::path::{Path, PathBuf};

const REPLACED_CHARS: [char; 10] = ['/', '?', '<', '>', '\\', ':', '*', '|', '"', ' '];

/// Turns an application id into something usable as a single path component.
///
/// Every character of `/ ? < > \ : * | "` and space becomes `.`, then each run of
/// periods collapses into one. `"a:b c"` becomes `"a.b.c"`.
pub fn sanitize_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        let c = if REPLACED_CHARS.contains(&c) { '.' } else { c };
        if c == '.' && out.ends_with('.') {
            continue;
        }
        out.push(c);
    }
    out
}

/// `<home>/<confdir>/<id>`
pub(crate) fn build_storage_dir<P>(home: P, confdir: &str, id: &str) -> PathBuf where P: AsRef<Path> {
    home.as_ref().join(confdir).join(id)
}
