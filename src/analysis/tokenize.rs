/// Separator placed between bodies when building the corpus
pub const CORPUS_SEPARATOR: &str = "\n";

/// Returns true for characters that belong to a token
///
/// Word characters are Unicode alphanumerics and `_`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Joins bodies into a single corpus string, newline-separated
pub fn build_corpus<S: AsRef<str>>(bodies: &[S]) -> String {
    bodies
        .iter()
        .map(|body| body.as_ref())
        .collect::<Vec<_>>()
        .join(CORPUS_SEPARATOR)
}

/// Splits text into lowercase tokens
///
/// Every maximal run of non-word characters is a separator. Empty pieces
/// (from leading or trailing separators) are dropped.
///
/// # Examples
///
/// ```
/// use sumi_harvest::analysis::tokenize;
///
/// let tokens: Vec<String> = tokenize("  def Foo(): pass").collect();
/// assert_eq!(tokens, vec!["def", "foo", "pass"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !is_word_char(c))
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.to_lowercase())
}
