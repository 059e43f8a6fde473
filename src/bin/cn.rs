//! Short binary name (`cn`) that forwards to the `card_notes` library.

fn main() {
    if let Err(err) = card_notes::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
