//! A prompt paired with the file offset it jumps to.

use core::fmt;

/// One jump target: the text a menu or entry shows the user, and the byte
/// offset of the entry it points at. An offset of `-1` means "no target".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    text: String,
    offset: i64,
}

impl Link {
    pub fn new(text: impl Into<String>, offset: i64) -> Self {
        Link {
            text: text.into(),
            offset,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// `true` if this link actually points somewhere.
    pub fn has_offset(&self) -> bool {
        self.offset > 0
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&Link> for i64 {
    fn from(link: &Link) -> i64 {
        link.offset
    }
}

#[cfg(test)]
mod tests {
    use super::Link;

    #[test]
    fn matches_seed_link() {
        let link = Link::new("Functions", 525);
        assert_eq!(link.text(), "Functions");
        assert_eq!(link.offset(), 525);
        assert!(link.has_offset());
    }

    #[test]
    fn zero_and_negative_offsets_are_falsy() {
        assert!(!Link::new("x", 0).has_offset());
        assert!(!Link::new("x", -1).has_offset());
    }
}
