//! Console greeting and footer year.

use super::PageElements;
use crate::console;

const TITLE_CSS: &str = "font-size: 24px; color: #6366f1; font-weight: bold; text-shadow: 2px 2px 4px rgba(99,102,241,0.3);";
const SUBTITLE_CSS: &str = "font-size: 16px; color: #8b5cf6; font-weight: 600;";
const TEXT_CSS: &str = "font-size: 14px; color: #10b981;";
const SECRET_CSS: &str = "font-size: 12px; color: #f59e0b; font-style: italic;";

/// `(message, css)` pairs printed once at start-up.
pub const BANNER: [(&str, &str); 4] = [
    ("%c🚀 Welcome to my portfolio!", TITLE_CSS),
    ("%c✨ Built with modern web technologies", SUBTITLE_CSS),
    (
        "%c💼 Interested in the code? Check out: https://github.com/wasif-izar",
        TEXT_CSS,
    ),
    ("%c🎮 Easter egg: Triple-tap my name for a surprise!", SECRET_CSS),
];

pub fn print_banner() {
    for (msg, css) in BANNER {
        console::log_styled(msg, css);
    }
}

pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

pub fn fill_year(els: &PageElements, year: u32) {
    if let Some(slot) = &els.year_slot {
        slot.set_text_content(Some(&year.to_string()));
    }
}

pub fn install(els: &PageElements) {
    fill_year(els, current_year());
    print_banner();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lines_are_styled() {
        for (msg, css) in BANNER {
            assert!(msg.starts_with("%c"), "unstyled banner line: {}", msg);
            assert!(css.contains("font-size"));
        }
        assert!(BANNER[3].0.contains("Triple-tap"));
    }
}
