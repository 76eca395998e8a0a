//! Top-level menu records.

use crate::error::Result;
use crate::link::Link;
use crate::prompts::PromptCollection;
use crate::reader::Reader;

/// One of the guide's top-level menus: a title plus an ordered list of
/// prompts, each pointing at the entry it opens.
#[derive(Debug, Clone)]
pub struct Menu {
    title: String,
    prompts: PromptCollection,
}

impl Menu {
    /// Decode a menu record at the reader's current position. The cursor
    /// must be sitting on a record whose type tag is `2`.
    pub(crate) fn load(reader: &mut Reader) -> Result<Self> {
        reader.skip(2)?; // type tag, already known to be 2
        reader.skip(2)?; // body size, unused
        // The file stores one more than the user-visible prompt count; a
        // raw count of 0 legitimately means "no prompts" rather than wrapping.
        let count = reader.read_word(true)?.saturating_sub(1);
        reader.skip(20)?;

        let mut offsets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            offsets.push(reader.read_offset()?);
        }

        reader.skip((count as i64 + 1) * 8)?;

        let title = Reader::unrle(&reader.read_strz(128, true)?);

        let mut prompts = Vec::with_capacity(count as usize);
        for _ in 0..count {
            prompts.push(Reader::unrle(&reader.read_strz(128, true)?));
        }

        reader.skip(1)?;

        Ok(Menu {
            title,
            prompts: PromptCollection::new(prompts, offsets),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Link> {
        self.prompts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Link> + '_ {
        self.prompts.iter()
    }
}
