//! Short and long content entries.

use crate::error::{Error, Result};
use crate::link::Link;
use crate::reader::Reader;
use crate::seealso::SeeAlso;
use crate::types::{EntryType, MAX_LINE_LENGTH};

/// Where an entry sits relative to the menu structure that opened it.
///
/// Each field is `-1` when the corresponding sentinel was stored in the
/// file, meaning "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryParent {
    line: i32,
    offset: i64,
    menu: i32,
    prompt: i32,
}

impl EntryParent {
    fn load(reader: &mut Reader) -> Result<Self> {
        let line = reader.read_index()?;
        let offset = reader.read_offset()?;
        let menu = reader.read_index()?;
        let prompt = reader.read_index()?;
        Ok(EntryParent {
            line,
            offset,
            menu,
            prompt,
        })
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// `true` if this entry was reached from somewhere, i.e. has a parent at all.
    pub fn is_present(&self) -> bool {
        self.offset > 0
    }

    pub fn line(&self) -> i32 {
        self.line
    }

    pub fn has_line(&self) -> bool {
        self.line != -1
    }

    pub fn menu(&self) -> i32 {
        self.menu
    }

    pub fn has_menu(&self) -> bool {
        self.menu != -1
    }

    pub fn prompt(&self) -> i32 {
        self.prompt
    }

    pub fn has_prompt(&self) -> bool {
        self.has_menu() && self.prompt != -1
    }
}

/// The 22-byte preamble common to every entry, plus the byte offset the
/// entry itself started at and its type tag.
#[derive(Debug, Clone)]
pub(crate) struct EntryHeader {
    offset: u64,
    type_tag: u16,
    size: u16,
    line_count: u16,
    has_see_also_flag: u16,
    parent: EntryParent,
    previous: i64,
    next: i64,
}

impl EntryHeader {
    fn load(reader: &mut Reader) -> Result<Self> {
        let offset = reader.position()?;
        let type_tag = reader.read_word(true)?;
        let size = reader.read_word(true)?;
        let line_count = reader.read_word(true)?;
        let has_see_also_flag = reader.read_word(true)?;
        let parent = EntryParent::load(reader)?;
        let previous = reader.read_offset()?;
        let next = reader.read_offset()?;
        Ok(EntryHeader {
            offset,
            type_tag,
            size,
            line_count,
            has_see_also_flag,
            parent,
            previous,
            next,
        })
    }
}

/// An index-like entry: a line per offset, each pointing at another entry.
#[derive(Debug, Clone)]
pub struct Short {
    header: EntryHeader,
    offsets: Vec<i64>,
    lines: Vec<String>,
}

entry_common!(Short);

impl Short {
    fn load(reader: &mut Reader, header: EntryHeader) -> Result<Self> {
        let mut offsets = Vec::with_capacity(header.line_count as usize);
        for _ in 0..header.line_count {
            reader.skip(2)?;
            offsets.push(reader.read_offset()?);
        }

        let mut lines = Vec::with_capacity(header.line_count as usize);
        for _ in 0..header.line_count {
            lines.push(Reader::unrle(&reader.read_strz(MAX_LINE_LENGTH, true)?));
        }

        Ok(Short {
            header,
            offsets,
            lines,
        })
    }

    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    pub fn get(&self, index: usize) -> Option<Link> {
        Some(Link::new(self.lines.get(index)?.clone(), self.offsets[index]))
    }

    pub fn iter(&self) -> impl Iterator<Item = Link> + '_ {
        (0..self.lines.len()).map(move |i| self.get(i).expect("index in bounds"))
    }
}

/// A prose entry: a block of text lines, and optionally a see-also block.
#[derive(Debug, Clone)]
pub struct Long {
    header: EntryHeader,
    lines: Vec<String>,
    see_also: SeeAlso,
}

entry_common!(Long);

impl Long {
    fn load(reader: &mut Reader, header: EntryHeader) -> Result<Self> {
        let mut lines = Vec::with_capacity(header.line_count as usize);
        for _ in 0..header.line_count {
            lines.push(Reader::unrle(&reader.read_strz(MAX_LINE_LENGTH, true)?));
        }

        let see_also = if header.has_see_also_flag != 0 {
            SeeAlso::load(reader)?
        } else {
            SeeAlso::empty()
        };

        Ok(Long {
            header,
            lines,
            see_also,
        })
    }

    pub fn see_also(&self) -> &SeeAlso {
        &self.see_also
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// A content entry: either a [`Short`] or a [`Long`].
#[derive(Debug, Clone)]
pub enum Entry {
    Short(Short),
    Long(Long),
}

impl Entry {
    /// Decode whatever entry sits at the reader's current position.
    ///
    /// Fails with [`Error::UnknownEntryType`] for a menu record or any tag
    /// this library doesn't recognise.
    pub(crate) fn load(reader: &mut Reader) -> Result<Self> {
        let header = EntryHeader::load(reader)?;
        match EntryType::from_word(header.type_tag) {
            Some(EntryType::Short) => Ok(Entry::Short(Short::load(reader, header)?)),
            Some(EntryType::Long) => Ok(Entry::Long(Long::load(reader, header)?)),
            _ => Err(Error::UnknownEntryType(header.type_tag)),
        }
    }

    pub fn offset(&self) -> u64 {
        match self {
            Entry::Short(s) => s.offset(),
            Entry::Long(l) => l.offset(),
        }
    }

    pub fn as_short(&self) -> Option<&Short> {
        match self {
            Entry::Short(s) => Some(s),
            Entry::Long(_) => None,
        }
    }

    pub fn as_long(&self) -> Option<&Long> {
        match self {
            Entry::Long(l) => Some(l),
            Entry::Short(_) => None,
        }
    }
}

impl core::fmt::Display for Entry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Entry::Short(s) => write!(f, "{s}"),
            Entry::Long(l) => write!(f, "{l}"),
        }
    }
}
