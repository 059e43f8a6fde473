//! Card-style notes kept in a single JSON store file.
//!
//! [`NoteStore`] owns the collection and its persistence, [`Session`] runs
//! the list/editor/selection view states on top of it, and the `cn` CLI is a
//! terminal presentation of both.

pub mod args;
pub mod config;
pub mod editor;
pub mod formatting;
pub mod gesture;
pub mod logging;
pub mod note;
pub mod render;
pub mod selection;
pub mod session;
pub mod shared;
pub mod store;
pub mod theme;

pub use config::Config;
pub use gesture::{Gesture, LONG_PRESS_THRESHOLD, classify_gesture};
pub use note::{Note, NoteId};
pub use selection::{SelectionChange, SelectionSet};
pub use session::{PressOutcome, SaveOutcome, Session, ViewState};
pub use store::{NoteStore, StoreError};
pub use theme::{Palette, Theme};

use args::{ArgParser, EditFlags};
use formatting::FormatContext;
use std::env;
use std::error::Error;

pub fn entry() -> Result<(), Box<dyn Error>> {
    logging::init();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let cmd = args.remove(0);
    let config = Config::from_env();

    match cmd.as_str() {
        "list" => list_notes(args, &config)?,
        "new" => new_note(args, &config)?,
        "view" => view_note(args, &config)?,
        "edit" => edit_note(args, &config)?,
        "delete" => delete_notes(args, &config)?,
        "select" => select_notes(args, &config)?,
        "theme" => print_theme(&config),
        "path" => println!("{}", config.store_path.display()),
        "help" | "-h" | "--help" => print_help(),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Card Notes
Usage:
  cn list                         Show notes as cards, newest first
  cn new <title> [content...]     Create a note
  cn view <id>                    Show a note in full
  cn edit <id> [--title <t>] [--content <c>]
                                  Edit a note (opens $EDITOR without flags)
  cn delete <id...>               Select the given notes and delete them
  cn select <id...>               Preview the list with the given notes selected
  cn theme                        Show the active color palette
  cn path                         Show the store file path
  cn help                         Show this message

Ids may be shortened to any unique prefix (the 8 characters on each card).

Environment:
  CARD_NOTES_FILE                 Store file (default: ./notes_data.json)
  CARD_NOTES_THEME                light | dark (default: light)
  NO_COLOR                        Disable colored output
  EDITOR                          Editor for `cn edit` (default: vi)
  RUST_LOG                        Log level (default: warn)
"
    );
}

fn open_session(config: &Config) -> Session {
    Session::new(NoteStore::load(&config.store_path))
}

fn format_context(config: &Config) -> FormatContext {
    FormatContext::new(config.use_color, config.theme)
}

fn screen_width() -> usize {
    render::terminal_columns().unwrap_or(render::DEFAULT_WIDTH)
}

/// Print anything the session wants the user to know, e.g. a failed save.
fn report_notices(session: &mut Session, ctx: &FormatContext) {
    for notice in session.take_notices() {
        eprintln!("{}", ctx.format_warning(&format!("warning: {notice}")));
    }
}

fn expect_no_flags(args: Vec<String>, command: &str) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, command);
    match parser.next() {
        Some(extra) => Err(parser.unknown_flag(&extra)),
        None => Ok(()),
    }
}

fn list_notes(args: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    expect_no_flags(args, "list")?;
    let session = open_session(config);
    let ctx = format_context(config);
    for line in render::render_list(session.store(), screen_width(), &ctx) {
        println!("{line}");
    }
    Ok(())
}

fn new_note(args: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "new");
    let title = parser.next().ok_or("Usage: cn new <title> [content...]")?;
    let content = parser.collect_remaining().join(" ");

    let mut session = open_session(config);
    let ctx = format_context(config);
    session.begin_create();
    let outcome = session.save(&title, &content);
    report_notices(&mut session, &ctx);
    match outcome {
        SaveOutcome::Saved(note) => {
            println!("Created note {} ({})", note.short_id(), note.title());
            Ok(())
        }
        _ => Err("Note title cannot be empty; nothing saved".into()),
    }
}

fn view_note(args: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "view");
    let needle = parser.next().ok_or("Usage: cn view <id>")?;
    let session = open_session(config);
    let id = session.store().resolve_id(&needle)?;
    let note = session.store().get(id).ok_or(StoreError::NotFound(id))?;
    print!("{}", render::render_note(note, &format_context(config)));
    Ok(())
}

fn edit_note(args: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    let flags = EditFlags::parse(args)?;
    let needle = flags
        .id
        .clone()
        .ok_or("Usage: cn edit <id> [--title <t>] [--content <c>]")?;

    let mut session = open_session(config);
    let ctx = format_context(config);
    let id = session.store().resolve_id(&needle)?;
    if !session.open_note(id) {
        return Err(StoreError::NotFound(id).into());
    }
    let (title, content) =
        session.editor_draft().ok_or(StoreError::NotFound(id))?;

    let from_editor = !flags.has_fields();
    let (title, content) = if from_editor {
        editor::edit_in_editor(
            &config.editor,
            &note::short_id(id),
            &title,
            &content,
        )?
    } else {
        (flags.title.unwrap_or(title), flags.content.unwrap_or(content))
    };

    let outcome = session.save(&title, &content);
    report_notices(&mut session, &ctx);
    match outcome {
        SaveOutcome::Saved(note) => {
            println!("Updated {} ({})", note.short_id(), note.title());
            Ok(())
        }
        SaveOutcome::Missing(id) => Err(StoreError::NotFound(id).into()),
        _ => {
            session.back();
            if from_editor {
                // The scratch file is gone; hand the edit back to the user.
                eprint!(
                    "Your edit was not saved:\n{}",
                    editor::format_draft(&title, &content)
                );
            }
            Err("Note title cannot be empty; nothing saved".into())
        }
    }
}

/// Resolve ids for a selection gesture, reporting the ones that do not
/// match. Duplicates are dropped so a repeated id does not toggle twice.
fn resolve_many(session: &Session, needles: Vec<String>) -> Vec<NoteId> {
    let mut ids: Vec<NoteId> = Vec::new();
    for needle in needles {
        match session.store().resolve_id(&needle) {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(err) => eprintln!("Skipped {needle}: {err}"),
        }
    }
    ids
}

/// Long-press the first note, then tap the rest.
fn select_ids(session: &mut Session, ids: &[NoteId]) {
    let mut iter = ids.iter();
    if let Some(first) = iter.next() {
        session.long_press(*first);
    }
    for id in iter {
        session.tap(*id);
    }
}

fn delete_notes(args: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Usage: cn delete <id...>".into());
    }
    let mut session = open_session(config);
    let ctx = format_context(config);
    let ids = resolve_many(&session, args);
    select_ids(&mut session, &ids);
    if session.state() != ViewState::SelectingForDelete {
        println!("No notes deleted.");
        return Ok(());
    }

    let removed = session.confirm_delete();
    report_notices(&mut session, &ctx);
    println!("Deleted {removed} note(s)");
    Ok(())
}

fn select_notes(args: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Usage: cn select <id...>".into());
    }
    let mut session = open_session(config);
    let ctx = format_context(config);
    let ids = resolve_many(&session, args);
    select_ids(&mut session, &ids);
    for line in render::render_list(session.store(), screen_width(), &ctx) {
        println!("{line}");
    }
    Ok(())
}

fn print_theme(config: &Config) {
    let ctx = format_context(config);
    println!("{}", render::render_palette(config.theme, &ctx));
}
