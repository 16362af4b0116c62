//! Greedy word wrapping by character count.
//!
//! Lines break at whitespace; runs of whitespace collapse to one space and
//! never start or end a line. Hyphenated words may also break after a
//! hyphen that sits between letters (`Arts-and-Crafts` can end a line at
//! `Arts-`), but not in numbers or ranges such as `10-12`. A word longer
//! than the limit fills the rest of the current line and continues on the
//! next.

/// Wraps `text` into lines of at most `width` characters.
///
/// ```
/// use u_calendar::render::wrap;
///
/// let lines = wrap("11:00 Coffee & Chat in the lounge", 20);
/// assert_eq!(lines, ["11:00 Coffee & Chat", "in the lounge"]);
/// assert_eq!(wrap("Arts-and-Crafts", 10), ["Arts-and-", "Crafts"]);
/// assert!(wrap("   ", 10).is_empty());
/// ```
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        for (idx, chunk) in hyphen_chunks(word).into_iter().enumerate() {
            let mut rest: Vec<char> = chunk.chars().collect();
            let mut spaced = idx == 0;
            while !rest.is_empty() {
                let gap = usize::from(spaced && line_len > 0);
                if line_len + gap + rest.len() <= width {
                    push_piece(&mut line, &mut line_len, &rest, gap > 0);
                    rest.clear();
                    continue;
                }

                if rest.len() > width {
                    let space_left = width.saturating_sub(line_len + gap);
                    if space_left > 0 {
                        let tail = rest.split_off(space_left);
                        push_piece(&mut line, &mut line_len, &rest, gap > 0);
                        rest = tail;
                    }
                }
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                spaced = true;
            }
        }
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Splits a word after each hyphen preceded by two letters and followed
/// by a letter, an optional hyphen, and another letter.
fn hyphen_chunks(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let is_letter = |i: usize| {
        chars
            .get(i)
            .is_some_and(|(_, c)| c.is_alphabetic() || *c == '_')
    };

    let mut chunks = Vec::new();
    let mut start = 0;
    for i in 2..chars.len() {
        if chars[i].1 != '-' || !is_letter(i - 1) || !is_letter(i - 2) || !is_letter(i + 1) {
            continue;
        }
        let next_ok = is_letter(i + 2)
            || (chars.get(i + 2).is_some_and(|(_, c)| *c == '-') && is_letter(i + 3));
        if next_ok {
            let end = chars[i].0 + 1;
            chunks.push(&word[start..end]);
            start = end;
        }
    }
    chunks.push(&word[start..]);
    chunks
}

/// Splits `line` further until every piece measures at most `max_width`.
///
/// Breaks at the last space that fits, or mid-word when no space does.
/// A single character wider than `max_width` is kept on its own.
pub fn fit_width<F>(line: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut pieces = Vec::new();
    let mut rest = line.trim().to_string();

    while !rest.is_empty() && measure(&rest) > max_width {
        let chars: Vec<char> = rest.chars().collect();
        let mut fit = 1;
        while fit < chars.len() {
            let prefix: String = chars[..=fit].iter().collect();
            if measure(&prefix) > max_width {
                break;
            }
            fit += 1;
        }
        let cut = chars[..fit]
            .iter()
            .rposition(|c| *c == ' ')
            .filter(|&i| i > 0 && fit < chars.len())
            .unwrap_or(fit);
        let head: String = chars[..cut].iter().collect();
        let tail: String = chars[cut..].iter().collect();
        pieces.push(head.trim_end().to_string());
        rest = tail.trim_start().to_string();
    }

    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}

fn push_piece(line: &mut String, line_len: &mut usize, piece: &[char], spaced: bool) {
    if spaced {
        line.push(' ');
        *line_len += 1;
    }
    line.extend(piece);
    *line_len += piece.len();
}
