//! Lint: bracket-key labels (`[a]`, `[1]`) must be clickable.
//!
//! Any `[X]`-style hint rendered from a `render.rs` has to go through
//! `push_clickable()` so that taps on it reach the same action as the key.
//! A plain `cl.push(...)` would draw the hint but leave it dead on touch
//! screens.

use std::fs;
use std::path::Path;

/// True for a single alphanumeric (or punctuation key) between brackets.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=!~|".contains(&w[1]))
    })
}

/// `(line number, text)` of every non-clickable `.push(` carrying a bracket key.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.starts_with("//") || !contains_bracket_key(line) {
                return None;
            }
            let plain_push = line.contains(".push(") && !line.contains("push_clickable(");
            plain_push.then(|| (i + 1, trimmed.to_string()))
        })
        .collect()
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            let shown = path.display().to_string();
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((shown.clone(), line_num, line));
            }
        }
    }
}

#[test]
fn render_files_exist() {
    let render = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/game/render.rs");
    assert!(render.is_file(), "expected {}", render.display());
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();
    visit_render_files(&src, &mut violations);

    if !violations.is_empty() {
        let mut msg = String::from(
            "Found bracket-key text [X] in non-clickable push() calls; use push_clickable().\n\n",
        );
        for (file, line_num, line) in &violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_plain_push() {
        let source = r#"cl.push(Line::from(" [a] Cardboard Box"));"#;
        assert_eq!(find_bracket_key_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [a] Cardboard Box"), BUY_OFFER_BASE);"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [a] Cardboard Box"));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn reports_line_numbers() {
        let source = "let x = 1;\ncl.push(Line::from(\"[1] Career\"));\n";
        assert_eq!(find_bracket_key_in_push(source)[0].0, 2);
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[a]"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[-]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[SPACE]"));
        assert!(!contains_bracket_key("[{}]"));
        assert!(!contains_bracket_key("ab"));
    }
}
