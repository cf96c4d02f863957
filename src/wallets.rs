//! Private key list loading.

use eyre::Context;
use std::path::Path;

/// Loads private keys from a text file, one per line.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn load_keys<P: AsRef<Path>>(path: P) -> eyre::Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read key file: {}", path.display()))?;
    Ok(parse_keys(&content))
}

fn parse_keys(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let content = "\n# first wallet\nabc123\n\n   \ndef456  \n# trailing comment\n";
        assert_eq!(parse_keys(content), vec!["abc123", "def456"]);
    }

    #[test]
    fn empty_input_yields_no_keys() {
        assert!(parse_keys("").is_empty());
        assert!(parse_keys("# only a comment\n").is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_keys("does-not-exist.txt").is_err());
    }
}
