//! Text cleanup shared by every source and the renderer.

/// Typographic characters and their ASCII stand-ins.
const REPLACEMENTS: [(char, &str); 8] = [
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2026}', "..."),
    ('\u{a0}', " "),
];

/// Replaces typographic punctuation with ASCII, drops any other non-ASCII
/// character, and trims.
///
/// ```
/// use u_calendar::sources::clean_text;
///
/// assert_eq!(clean_text("St Andrew\u{2019}s Day "), "St Andrew's Day");
/// assert_eq!(clean_text("Caf\u{e9}"), "Caf");
/// ```
pub fn clean_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if let Some((_, ascii)) = REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            out.push_str(ascii);
        } else if c.is_ascii() {
            out.push(c);
        }
    }
    out.trim().to_string()
}
