//! Card grid rendering for the terminal front-end.

use crate::formatting::FormatContext;
use crate::note::Note;
use crate::selection::SelectionSet;
use crate::shared::text::{pad_to, truncate_with_ellipsis, wrap_text};
use crate::store::NoteStore;
use crate::theme::Theme;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

pub const DEFAULT_WIDTH: usize = 80;
pub const CARD_GAP: usize = 2;
pub const MIN_CARD_WIDTH: usize = 30;
pub const MAX_COLUMNS: usize = 3;
pub const PREVIEW_LINES: usize = 4;
const CHECK_MARK: &str = "✔";

/// Cards per row for a terminal `width`; two on a standard 80 column
/// terminal.
pub fn columns_for_width(width: usize) -> usize {
    ((width + CARD_GAP) / (MIN_CARD_WIDTH + CARD_GAP)).clamp(1, MAX_COLUMNS)
}

fn card_width(width: usize, columns: usize) -> usize {
    let gaps = CARD_GAP * columns.saturating_sub(1);
    (width.saturating_sub(gaps) / columns.max(1)).max(12)
}

pub fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| usize::from(w.0))
}

/// Flatten markdown into plain text lines for card previews.
pub fn plain_lines(input: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let flush = |current: &mut String, lines: &mut Vec<String>| {
        for line in current.split('\n') {
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        current.clear();
    };

    for event in Parser::new(input) {
        match event {
            Event::Text(t) | Event::Code(t) => current.push_str(&t),
            Event::Start(Tag::Item) => {
                flush(&mut current, &mut lines);
                current.push_str("• ");
            }
            Event::Start(Tag::List(_))
            | Event::SoftBreak
            | Event::HardBreak
            | Event::Rule
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => {
                flush(&mut current, &mut lines);
            }
            _ => {}
        }
    }
    flush(&mut current, &mut lines);
    lines
}

/// Up to `max_lines` wrapped preview lines; the last one ends with an
/// ellipsis when content was cut.
pub fn preview_lines(content: &str, width: usize, max_lines: usize) -> Vec<String> {
    let wrapped: Vec<String> = plain_lines(content)
        .iter()
        .flat_map(|line| wrap_text(line, width))
        .collect();
    if wrapped.len() <= max_lines {
        return wrapped;
    }
    let mut out: Vec<String> = wrapped.into_iter().take(max_lines).collect();
    if let Some(last) = out.last_mut() {
        let mut cut: String =
            last.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        *last = cut;
    }
    out
}

/// One card as fixed-height lines of `width` visible columns.
pub fn render_card(
    note: &Note,
    selected: bool,
    width: usize,
    ctx: &FormatContext,
) -> Vec<String> {
    let inner = width.saturating_sub(4);
    let edge = "─".repeat(inner + 2);
    let side = ctx.format_border("│", selected);
    let row = |body: String| format!("{side}{body}{side}");
    let cell = |text: &str| format!(" {} ", pad_to(text, inner));

    let mut lines = Vec::with_capacity(PREVIEW_LINES + 4);
    lines.push(ctx.format_border(&format!("╭{edge}╮"), selected));

    let mark = if selected { CHECK_MARK } else { " " };
    let title_width = inner.saturating_sub(2);
    let title = pad_to(&truncate_with_ellipsis(note.title(), title_width), title_width);
    lines.push(row(format!(
        "{}{}{}",
        ctx.format_title(&format!(" {title} "), selected),
        ctx.format_check(mark),
        ctx.format_body(" ", selected)
    )));

    let mut preview = preview_lines(note.content(), inner, PREVIEW_LINES);
    preview.resize(PREVIEW_LINES, String::new());
    for line in preview {
        lines.push(row(ctx.format_body(&cell(&line), selected)));
    }

    let date = note.date_label();
    let id = note.short_id();
    let footer = if inner >= date.chars().count() + id.len() + 1 {
        let gap = inner - date.chars().count() - id.len();
        format!("{date}{}{id}", " ".repeat(gap))
    } else {
        truncate_with_ellipsis(&date, inner)
    };
    lines.push(row(ctx.format_muted(&cell(&footer), selected)));

    lines.push(ctx.format_border(&format!("╰{edge}╯"), selected));
    lines
}

/// Lay notes out in rows of cards, in the order given.
pub fn render_grid(
    notes: &[&Note],
    selection: &SelectionSet,
    width: usize,
    ctx: &FormatContext,
) -> Vec<String> {
    let columns = columns_for_width(width);
    let card_width = card_width(width, columns);
    let gap = " ".repeat(CARD_GAP);

    let mut out = Vec::new();
    for chunk in notes.chunks(columns) {
        let cards: Vec<Vec<String>> = chunk
            .iter()
            .map(|n| render_card(n, selection.contains(n.id()), card_width, ctx))
            .collect();
        let height = cards.first().map_or(0, Vec::len);
        for i in 0..height {
            let row: Vec<&str> = cards.iter().map(|c| c[i].as_str()).collect();
            out.push(row.join(&gap));
        }
    }
    out
}

pub fn note_count_label(count: usize) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{count} notes")
    }
}

pub fn render_header(count: usize, width: usize, ctx: &FormatContext) -> Vec<String> {
    vec![
        ctx.format_header(&pad_to(" Notes", width)),
        ctx.format_header(&pad_to(&format!(" {}", note_count_label(count)), width)),
    ]
}

/// The delete affordance, present only while something is selected.
pub fn render_delete_panel(selected: usize, ctx: &FormatContext) -> Option<String> {
    if selected == 0 {
        return None;
    }
    Some(ctx.format_action(&format!("[ delete {selected} selected ]")))
}

/// Full list view: header, card grid (newest first), delete affordance.
pub fn render_list(store: &NoteStore, width: usize, ctx: &FormatContext) -> Vec<String> {
    let notes = store.notes();
    let mut out = render_header(notes.len(), width, ctx);
    out.push(String::new());
    if notes.is_empty() {
        out.push("No notes yet. Try `cn new <title> [content]`.".to_string());
    } else {
        out.extend(render_grid(&notes, store.selection(), width, ctx));
    }
    if let Some(panel) = render_delete_panel(store.selection().len(), ctx) {
        out.push(String::new());
        out.push(panel);
    }
    out
}

pub fn render_note(note: &Note, ctx: &FormatContext) -> String {
    let mut out = format!(
        "{}\n{}\n",
        ctx.format_action(&format!("# {}", note.title())),
        ctx.format_muted(
            &format!("{}  ({})", note.timestamp_label(), note.id()),
            false
        ),
    );
    if !note.content().is_empty() {
        out.push('\n');
        out.push_str(note.content());
        out.push('\n');
    }
    out
}

pub fn render_palette(theme: Theme, ctx: &FormatContext) -> String {
    let headers = vec![format!("{theme}"), "color".to_string()];
    let rows: Vec<Vec<String>> = theme
        .palette()
        .entries()
        .into_iter()
        .map(|(key, hex)| vec![key.to_string(), ctx.format_swatch(hex)])
        .collect();
    crate::shared::text::render_table(&headers, &rows)
}
