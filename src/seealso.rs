//! The "see also" cross-reference block attached to some long entries.

use crate::error::Result;
use crate::link::Link;
use crate::prompts::PromptCollection;
use crate::reader::Reader;
use crate::types::MAX_SEE_ALSO;

/// Cross-references attached to a long entry. Entries without a see-also
/// flag set never decode one; [`SeeAlso::empty`] stands in for that case so
/// callers don't need an `Option`.
#[derive(Debug, Clone, Default)]
pub struct SeeAlso {
    prompts: PromptCollection,
}

impl SeeAlso {
    /// An empty see-also block, used when an entry's see-also flag is unset.
    pub fn empty() -> Self {
        SeeAlso::default()
    }

    /// Decode a see-also block at the reader's current position.
    pub(crate) fn load(reader: &mut Reader) -> Result<Self> {
        let count = reader.read_word(true)?.min(MAX_SEE_ALSO);

        let mut offsets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            offsets.push(reader.read_offset()?);
        }

        let mut prompts = Vec::with_capacity(count as usize);
        for _ in 0..count {
            prompts.push(Reader::unrle(&reader.read_strz(128, true)?));
        }

        Ok(SeeAlso {
            prompts: PromptCollection::new(prompts, offsets),
        })
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
