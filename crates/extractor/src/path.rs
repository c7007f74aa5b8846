// ABOUTME: Path resolution against an optional base URL and extension inspection.
// ABOUTME: Pure, idempotent joining with single-slash normalization.

use url::Url;

/// Resolves a raw attribute value against an optional base URL.
///
/// Empty values pass through untouched, as does everything when no base is
/// configured. Values that already carry a host are returned unchanged so a
/// base is never double-prefixed. Anything else is joined with exactly one
/// `/` between base and value.
///
/// Idempotent: `resolve(resolve(x, base), base) == resolve(x, base)` for any
/// base that itself carries a host.
pub fn resolve(raw: &str, base: Option<&str>) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let Some(base) = base else {
        return raw.to_string();
    };
    if has_host(raw) {
        return raw.to_string();
    }

    let base = base.strip_suffix('/').unwrap_or(base);
    let raw = raw.strip_prefix('/').unwrap_or(raw);
    format!("{}/{}", base, raw)
}

/// True when the value parses as an absolute URL with a host component.
fn has_host(value: &str) -> bool {
    Url::parse(value).map(|u| u.has_host()).unwrap_or(false)
}

/// The file extension of a path: the substring after the last `.` in the
/// path's last segment. None when the segment has no dot.
pub fn extension_of(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rsplit_once('.').map(|(_, ext)| ext)
}
