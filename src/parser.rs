//! A streaming parser for the `^`-prefixed markup dialect used in entry text.
//!
//! The control letter after a caret selects the behaviour; everything else
//! is passed through as plain text. Malformed markup never aborts the
//! parse: unrecognised or truncated sequences are recovered as literal
//! text, so a corrupt guide still renders something sensible.

use crate::dosify::{dos_char, make_dos_like};

const CTRL_CHAR: char = '^';

/// Receives the semantic events a line of markup decodes into.
///
/// Every method has a no-op default, mirroring a plain-text reader that
/// only cares about the literal characters; concrete visitors override
/// whichever subset of styling hooks they care about.
pub trait MarkupVisitor {
    fn text(&mut self, _text: &str) {}
    fn colour(&mut self, _attr: u8) {}
    fn normal(&mut self) {}
    fn bold(&mut self) {}
    fn unbold(&mut self) {}
    fn reverse(&mut self) {}
    fn unreverse(&mut self) {}
    fn underline(&mut self) {}
    fn ununderline(&mut self) {}
    fn char(&mut self, _code: u8) {}
}

#[derive(Default)]
struct ParseState {
    in_attr: bool,
    last_attr: u8,
    bold: bool,
    reverse: bool,
    underline: bool,
}

/// Parse one line of markup, driving `visitor`'s callbacks. Never fails.
pub fn parse(line: &str, visitor: &mut dyn MarkupVisitor) {
    let chars: Vec<char> = line.chars().collect();
    let mut state = ParseState::default();
    let mut pos = 0usize;

    while pos < chars.len() {
        match chars[pos..].iter().position(|&c| c == CTRL_CHAR) {
            None => {
                emit_text(visitor, &chars[pos..]);
                break;
            }
            Some(rel) => {
                let ctrl = pos + rel;
                emit_text(visitor, &chars[pos..ctrl]);
                pos = dispatch(&chars, ctrl, visitor, &mut state);
            }
        }
    }
}

fn emit_text(visitor: &mut dyn MarkupVisitor, chars: &[char]) {
    if !chars.is_empty() {
        let text: String = chars.iter().collect();
        visitor.text(&text);
    }
}

/// Parse the hex attribute/character byte following a `^A`/`^C` control
/// letter. Like the original, a single trailing hex digit at end-of-line
/// (e.g. `^A2`) is accepted; no digits at all fails to parse.
fn hex_byte(chars: &[char], ctrl: usize) -> Option<u8> {
    let start = (ctrl + 2).min(chars.len());
    let end = (ctrl + 4).min(chars.len());
    if start >= end {
        return None;
    }
    let digits: String = chars[start..end].iter().collect();
    u8::from_str_radix(&digits, 16).ok()
}

/// Dispatch the control sequence starting at `chars[ctrl]` (which is the
/// caret itself). Returns the index to resume scanning from.
fn dispatch(
    chars: &[char],
    ctrl: usize,
    visitor: &mut dyn MarkupVisitor,
    state: &mut ParseState,
) -> usize {
    let literal_pair = |v: &mut dyn MarkupVisitor| {
        emit_text(v, &chars[ctrl..chars.len().min(ctrl + 2)]);
    };

    match chars.get(ctrl + 1).copied() {
        None => ctrl + 1,
        Some(CTRL_CHAR) => {
            emit_text(visitor, &['^']);
            ctrl + 2
        }
        Some(letter) => match letter.to_ascii_uppercase() {
            'A' => match hex_byte(chars, ctrl) {
                Some(attr) => {
                    if state.in_attr && attr == state.last_attr {
                        visitor.normal();
                        state.in_attr = false;
                    } else {
                        visitor.colour(attr);
                        state.in_attr = true;
                        state.last_attr = attr;
                    }
                    ctrl + 4
                }
                None => {
                    literal_pair(visitor);
                    ctrl + 2
                }
            },
            'B' => {
                if state.bold {
                    visitor.unbold();
                } else {
                    visitor.bold();
                }
                state.bold = !state.bold;
                ctrl + 2
            }
            'C' => match hex_byte(chars, ctrl) {
                Some(code) => {
                    visitor.char(code);
                    ctrl + 4
                }
                None => {
                    literal_pair(visitor);
                    ctrl + 2
                }
            },
            'N' => {
                visitor.normal();
                state.in_attr = false;
                ctrl + 2
            }
            'R' => {
                if state.reverse {
                    visitor.unreverse();
                } else {
                    visitor.reverse();
                }
                state.reverse = !state.reverse;
                ctrl + 2
            }
            'U' => {
                if state.underline {
                    visitor.ununderline();
                } else {
                    visitor.underline();
                }
                state.underline = !state.underline;
                ctrl + 2
            }
            _ => ctrl + 1,
        },
    }
}

/// Accumulates the plain text of a line, discarding all styling.
#[derive(Debug, Default, Clone)]
pub struct PlainText {
    buffer: String,
}

impl PlainText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `line` and return just its plain text.
    pub fn parse(line: &str) -> String {
        let mut plain = PlainText::new();
        parse(line, &mut plain);
        plain.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl MarkupVisitor for PlainText {
    fn text(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn char(&mut self, code: u8) {
        self.buffer.push(code as char);
    }
}

impl core::fmt::Display for PlainText {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.buffer)
    }
}

/// A style that can be opened and later closed while parsing markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Bold,
    Reverse,
    Underline,
    Colour(u8),
}

/// Supplies the concrete open/close tags, colour naming, text escaping and
/// character translation for one markup dialect.
///
/// This is the composition-based stand-in for the abstract base class a
/// class hierarchy would use: [`MarkupText`] holds a `T: MarkupTags` field
/// instead of subclassing it.
pub trait MarkupTags {
    fn open(&self, tag: Tag) -> String;
    fn close(&self, tag: Tag) -> String;

    fn translate_char(&self, code: u8) -> char {
        code as char
    }

    fn escape_text<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        std::borrow::Cow::Borrowed(text)
    }
}

/// A parsed line with an open/close-tag stack layered over [`PlainText`]'s
/// accumulation. Each toggled-on style pushes its closing tag; `normal()`
/// flushes the stack in LIFO order, and an individual toggled-off style
/// pops just its own tag.
#[derive(Debug, Clone)]
pub struct MarkupText<T: MarkupTags> {
    buffer: String,
    stack: Vec<String>,
    tags: T,
}

impl<T: MarkupTags> MarkupText<T> {
    pub fn new(tags: T) -> Self {
        MarkupText {
            buffer: String::new(),
            stack: Vec::new(),
            tags,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    fn open_tag(&mut self, tag: Tag) {
        self.buffer.push_str(&self.tags.open(tag));
        self.stack.push(self.tags.close(tag));
    }

    fn close_one(&mut self) {
        if let Some(close) = self.stack.pop() {
            self.buffer.push_str(&close);
        }
    }
}

impl<T: MarkupTags> MarkupVisitor for MarkupText<T> {
    fn text(&mut self, text: &str) {
        self.buffer.push_str(&self.tags.escape_text(text));
    }

    fn char(&mut self, code: u8) {
        self.buffer.push(self.tags.translate_char(code));
    }

    fn colour(&mut self, attr: u8) {
        self.open_tag(Tag::Colour(attr));
    }

    fn normal(&mut self) {
        while let Some(close) = self.stack.pop() {
            self.buffer.push_str(&close);
        }
    }

    fn bold(&mut self) {
        self.open_tag(Tag::Bold);
    }

    fn unbold(&mut self) {
        self.close_one();
    }

    fn reverse(&mut self) {
        self.open_tag(Tag::Reverse);
    }

    fn unreverse(&mut self) {
        self.close_one();
    }

    fn underline(&mut self) {
        self.open_tag(Tag::Underline);
    }

    fn ununderline(&mut self) {
        self.close_one();
    }
}

/// The colour remap [`RichTags`] applies to each nibble of a `^A` attribute
/// byte before naming it, matching the values the reference viewer used.
fn remap_colour(nibble: u8) -> u8 {
    match nibble {
        1 => 4,
        3 => 6,
        4 => 1,
        6 => 3,
        9 => 21,
        11 => 14,
        12 => 196,
        14 => 11,
        other => other,
    }
}

/// A terminal-markup dialect: `[style]text[/]` tags, DOS code-page
/// translation for embedded characters, and `[` escaped as `\[`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichTags;

impl MarkupTags for RichTags {
    fn open(&self, tag: Tag) -> String {
        match tag {
            Tag::Bold => "[bold]".to_string(),
            Tag::Reverse => "[reverse]".to_string(),
            Tag::Underline => "[underline]".to_string(),
            Tag::Colour(attr) => {
                let fg = remap_colour(attr & 0x0F);
                let bg = remap_colour((attr >> 4) & 0x0F);
                format!("[color({fg}) on color({bg})]")
            }
        }
    }

    fn close(&self, _tag: Tag) -> String {
        "[/]".to_string()
    }

    fn translate_char(&self, code: u8) -> char {
        dos_char(code)
    }

    fn escape_text<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        std::borrow::Cow::Owned(make_dos_like(text).replace('[', "\\["))
    }
}

/// Rich, terminal-markup rendering of a line of guide text.
pub type RichText = MarkupText<RichTags>;

impl RichText {
    /// Parse `line` into its rich-text rendering.
    pub fn render(line: &str) -> String {
        let mut rich = MarkupText::new(RichTags);
        parse(line, &mut rich);
        rich.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl MarkupVisitor for Trace {
        fn text(&mut self, text: &str) {
            self.0.push(format!("T:{text}"));
        }
        fn colour(&mut self, attr: u8) {
            self.0.push(format!("A:{attr:02X}"));
        }
        fn normal(&mut self) {
            self.0.push("N".to_string());
        }
        fn char(&mut self, code: u8) {
            self.0.push(format!("C:{code:02X}"));
        }
    }

    #[test]
    fn seed_event_trace_matches() {
        let mut trace = Trace::default();
        parse("Hello, ^A20World^A20!", &mut trace);
        assert_eq!(
            trace.0,
            vec!["T:Hello, ", "A:20", "T:World", "N", "T:!"]
        );
    }

    #[test]
    fn doubled_caret_is_literal() {
        assert_eq!(PlainText::parse("^^^^"), "^^");
        assert_eq!(PlainText::parse(""), "");
    }

    #[test]
    fn trailing_lone_caret_is_silently_dropped() {
        assert_eq!(PlainText::parse("abc^"), "abc");
    }

    #[test]
    fn malformed_attr_recovers_as_text() {
        assert_eq!(PlainText::parse("^AZZ"), "^AZZ");
    }

    #[test]
    fn rich_text_wraps_bold_and_closes_on_toggle() {
        let out = RichText::render("^Bhi^B");
        assert_eq!(out, "[bold]hi[/]");
    }

    #[test]
    fn rich_text_escapes_brackets() {
        let out = RichText::render("a[b]c");
        assert_eq!(out, "a\\[b]c");
    }
}
