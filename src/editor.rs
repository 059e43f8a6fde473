//! External editor round-trip for the note editor view.

use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

const SEPARATOR: &str = "\n---\n";

pub fn format_draft(title: &str, content: &str) -> String {
    let mut body = content.trim_end_matches('\n').to_string();
    body.push('\n');
    format!("Title: {title}{SEPARATOR}{body}")
}

/// Split a draft back into `(title, content)`. Without a separator the whole
/// text is content and the title is empty.
pub fn parse_draft(raw: &str) -> (String, String) {
    let (header, body) = match raw.find(SEPARATOR) {
        Some(idx) => (&raw[..idx], &raw[idx + SEPARATOR.len()..]),
        None => ("", raw),
    };
    let title = header
        .lines()
        .find_map(|line| line.strip_prefix("Title:"))
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    (title, body.trim().to_string())
}

/// Write the draft to a fresh scratch file, open it in `editor`, and read it
/// back. The file is created exclusively under a random name and removed
/// when the handle drops.
pub fn edit_in_editor(
    editor: &str,
    name: &str,
    title: &str,
    content: &str,
) -> Result<(String, String), Box<dyn Error>> {
    let mut draft = tempfile::Builder::new()
        .prefix(&format!("card_notes-{name}-"))
        .suffix(".md")
        .tempfile()?;
    draft.write_all(format_draft(title, content).as_bytes())?;
    draft.flush()?;
    run_editor(editor, draft.path())?;
    let raw = fs::read_to_string(draft.path())?;
    Ok(parse_draft(&raw))
}

fn run_editor(editor: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    let status = Command::new(editor)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| format!("Could not launch editor `{editor}`: {e}"))?;
    if !status.success() {
        return Err("Editor exited with non-zero status".into());
    }
    Ok(())
}
