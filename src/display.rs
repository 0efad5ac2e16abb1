//! Debug output to tagged text surfaces.
//!
//! Any surface in a group whose tag matches the configured marker
//! (ASCII case-insensitive, otherwise exact) is switched
//! to text mode and overwritten with the debug buffer, one line per entry.

use crate::app::ports::{ContentType, DisplaySurface};

/// Write `lines` to every surface tagged with `tag`.  Returns how many were written.
pub fn render_debug(displays: &mut [&mut dyn DisplaySurface], tag: &str, lines: &[String]) -> usize {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }

    let mut written = 0;
    for screen in displays.iter_mut() {
        if !screen.tag().eq_ignore_ascii_case(tag) {
            continue;
        }
        if screen.content_type() != ContentType::TextAndImage {
            screen.set_content_type(ContentType::TextAndImage);
        }
        screen.write_text(&text);
        written += 1;
    }
    written
}
