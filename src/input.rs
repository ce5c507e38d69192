/// Splits a line read by `BufRead::lines` on bare `\r`, so files with old
/// Mac line endings yield one entry per line. A single trailing `\r` ends the
/// line and does not produce an extra empty entry.
pub fn split_carriage_returns(line: &str) -> impl Iterator<Item = &str> {
    line.strip_suffix('\r').unwrap_or(line).split('\r')
}

/// Pulls the candidate word out of one dictionary line.
///
/// Everything after the first `;` is annotation and is dropped. A line
/// without `;` is a token on its own.
pub fn extract_candidate(line: &str) -> String {
    let token = match line.split_once(';') {
        Some((token, _annotation)) => token,
        None => line,
    };

    token.trim_matches(is_separator_space).to_lowercase()
}

// Unicode whitespace plus the ASCII file/group/record/unit separators,
// which also count as space when trimming dictionary tokens.
fn is_separator_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
