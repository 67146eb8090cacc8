use url::Url;

/// Resolves a link target into an absolute HTTP(S) URL
///
/// Targets that already carry a scheme are taken as-is. Anything else is
/// joined onto `base_origin`, so both `/user/repo/a.py` and `a.py` land on the
/// origin's host.
///
/// Returns None if the target should be excluded:
/// - empty targets
/// - targets that do not parse after joining
/// - non-HTTP(S) URLs (`javascript:`, `mailto:`, `data:`, ...)
///
/// # Examples
///
/// ```
/// use sumi_harvest::url::resolve_target;
/// use url::Url;
///
/// let origin = Url::parse("https://github.com").unwrap();
///
/// let relative = resolve_target("/user/repo/blob/main/app.py", &origin).unwrap();
/// assert_eq!(relative.as_str(), "https://github.com/user/repo/blob/main/app.py");
///
/// let absolute = resolve_target("https://raw.example.com/app.py", &origin).unwrap();
/// assert_eq!(absolute.as_str(), "https://raw.example.com/app.py");
/// ```
pub fn resolve_target(target: &str, base_origin: &Url) -> Option<Url> {
    let target = target.trim();

    if target.is_empty() {
        return None;
    }

    let resolved = match Url::parse(target) {
        Ok(absolute) => absolute,
        Err(url::ParseError::RelativeUrlWithoutBase) => base_origin.join(target).ok()?,
        Err(e) => {
            tracing::debug!("Dropping unparsable link target '{}': {}", target, e);
            return None;
        }
    };

    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved)
    } else {
        None
    }
}
