/// Refills `text` into lines of at most `width` chars, breaking only at
/// whitespace. Existing line breaks count as whitespace, so refilling an
/// already filled string reflows it. A leading space stays on the first line;
/// a word wider than `width` is put on a line of its own rather than split.
pub fn fill(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    let mut has_word = false;
    if text.starts_with(char::is_whitespace) {
        line.push(' ');
        line_len = 1;
    }
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !has_word {
            line.push_str(word);
            line_len += word_len;
            has_word = true;
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
            line_len = word_len;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
