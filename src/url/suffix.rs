use percent_encoding::percent_decode_str;
use url::Url;

/// Returns the path portion of a link target
///
/// Everything from the first `?` or `#` onwards is dropped, so
/// `"/a/b.py?plain=1#L10"` yields `"/a/b.py"`.
pub fn target_path(target: &str) -> &str {
    match target.find(|c: char| c == '?' || c == '#') {
        Some(idx) => &target[..idx],
        None => target,
    }
}

/// Checks whether a link target's path ends with `suffix`
///
/// The comparison is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use sumi_harvest::url::matches_suffix;
///
/// assert!(matches_suffix("/user/repo/blob/main/app.py", ".py"));
/// assert!(matches_suffix("/user/repo/blob/main/app.py?plain=1", ".py"));
/// assert!(!matches_suffix("/user/repo/blob/main/app.PY", ".py"));
/// ```
pub fn matches_suffix(target: &str, suffix: &str) -> bool {
    target_path(target.trim()).ends_with(suffix)
}

/// Checks whether a resolved URL's decoded path ends with `suffix`
///
/// The path is percent-decoded first, so a non-ASCII suffix still matches
/// after `Url::join` has encoded it.
///
/// # Examples
///
/// ```
/// use sumi_harvest::url::url_matches_suffix;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/src/caf.%C3%A9").unwrap();
/// assert!(url_matches_suffix(&url, ".é"));
///
/// let host_only = Url::parse("http://setup.py").unwrap();
/// assert!(!url_matches_suffix(&host_only, ".py"));
/// ```
pub fn url_matches_suffix(url: &Url, suffix: &str) -> bool {
    decoded_path(url).ends_with(suffix)
}

/// The percent-decoded path of `url`
pub(crate) fn decoded_path(url: &Url) -> String {
    percent_decode_str(url.path())
        .decode_utf8_lossy()
        .into_owned()
}
