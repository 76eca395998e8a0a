//! The entry point of this crate: opening a guide and walking its contents.

use std::path::Path;

use log::{debug, trace};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::menu::Menu;
use crate::reader::Reader;

/// An open Norton Guide or Expert Help database.
///
/// A `Guide` owns a [`Reader`] positioned somewhere in the file; `goto`,
/// `goto_first`, `skip` and `load` move that cursor around, and
/// [`Guide::entries`] walks every content entry in file order.
pub struct Guide {
    reader: Reader,
    magic: String,
    menu_count: u16,
    title: String,
    credits: [String; 5],
    menus: Vec<Menu>,
    first_entry: u64,
}

impl Guide {
    /// `true` iff `path`'s extension is `ng`, case-insensitively. Does not
    /// open or otherwise inspect the file; it's a quick filename filter for
    /// callers scanning a directory.
    pub fn maybe<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ng"))
    }

    /// Open `path` and read its header and menu table.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = Reader::open(path)?;

        let magic = reader.read_str(2, false)?;
        reader.skip(4)?;
        let menu_count = reader.read_word(false)?;
        let title = reader.read_str(40, false)?;
        let credits = [
            reader.read_str(66, false)?,
            reader.read_str(66, false)?,
            reader.read_str(66, false)?,
            reader.read_str(66, false)?,
            reader.read_str(66, false)?,
        ];

        let mut menus = Vec::new();
        if magic == "NG" || magic == "EH" {
            while reader.peek_word(false)? == 2 {
                menus.push(Menu::load(&mut reader)?);
            }
            debug_assert_eq!(menus.len(), menu_count as usize);
        }
        let first_entry = reader.position()?;

        if magic == "NG" || magic == "EH" {
            debug!(
                "opened {} guide: {} menus, first entry at {}",
                magic,
                menus.len(),
                first_entry
            );
        }

        Ok(Guide {
            reader,
            magic,
            menu_count,
            title,
            credits,
            menus,
            first_entry,
        })
    }

    /// `true` if the file had a recognised magic number (`"NG"` or `"EH"`).
    pub fn is_a(&self) -> bool {
        self.magic == "NG" || self.magic == "EH"
    }

    pub fn is_open(&self) -> bool {
        !self.reader.is_closed()
    }

    /// "Norton Guide" or "Expert Help", for display purposes.
    pub fn made_with(&self) -> &'static str {
        match self.magic.as_str() {
            "NG" => "Norton Guide",
            "EH" => "Expert Help",
            _ => "Unknown",
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn credits(&self) -> &[String; 5] {
        &self.credits
    }

    pub fn menu_count(&self) -> u16 {
        self.menu_count
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn first_entry_offset(&self) -> u64 {
        self.first_entry
    }

    /// Release the underlying file. Calling this more than once is a no-op.
    pub fn close(&mut self) {
        self.reader.close();
    }

    /// Move the cursor to an absolute offset.
    pub fn goto(&mut self, offset: u64) -> Result<&mut Self> {
        self.reader.seek(offset)?;
        Ok(self)
    }

    /// Move the cursor to the first content entry, just past the menu table.
    pub fn goto_first(&mut self) -> Result<&mut Self> {
        let first_entry = self.first_entry;
        self.goto(first_entry)
    }

    /// `true` once the cursor has reached or passed the end of the file.
    pub fn eof(&mut self) -> Result<bool> {
        self.reader.eof()
    }

    /// Skip over the entry at the current position without decoding it.
    pub fn skip(&mut self) -> Result<&mut Self> {
        if self.eof()? {
            return Err(Error::Eof);
        }
        self.reader.skip_entry()?;
        Ok(self)
    }

    /// Decode the entry at the current position, restoring the cursor
    /// afterwards regardless of the outcome.
    pub fn load(&mut self) -> Result<Entry> {
        if self.eof()? {
            return Err(Error::Eof);
        }
        let pos = self.reader.position()?;
        let result = Entry::load(&mut self.reader);
        self.reader.seek(pos)?;
        if let Ok(entry) = &result {
            trace!("loaded entry at {} (type {})", pos, entry.offset());
        }
        result
    }

    /// Iterate over every short and long entry in the guide, in file order.
    ///
    /// The cursor is re-anchored to the last yielded entry's offset before
    /// each `skip`/`load`, so the iteration stays correct even if the
    /// caller moves the cursor between calls to [`Iterator::next`].
    pub fn entries(&mut self) -> Entries<'_> {
        Entries {
            guide: self,
            state: EntriesState::Start,
        }
    }
}

enum EntriesState {
    Start,
    Resuming(u64),
    Done,
}

/// Iterator over a guide's content entries, yielded by [`Guide::entries`].
pub struct Entries<'a> {
    guide: &'a mut Guide,
    state: EntriesState,
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Result<Entry>> {
        match self.state {
            EntriesState::Done => None,
            EntriesState::Start => match self.guide.goto_first().and_then(|g| g.load()) {
                Ok(entry) => {
                    self.state = EntriesState::Resuming(entry.offset());
                    Some(Ok(entry))
                }
                Err(err) if err.stops_iteration() => {
                    self.state = EntriesState::Done;
                    None
                }
                Err(err) => {
                    self.state = EntriesState::Done;
                    Some(Err(err))
                }
            },
            EntriesState::Resuming(offset) => {
                let next = self
                    .guide
                    .goto(offset)
                    .and_then(|g| g.skip())
                    .and_then(|g| g.load());
                match next {
                    Ok(entry) => {
                        self.state = EntriesState::Resuming(entry.offset());
                        Some(Ok(entry))
                    }
                    Err(err) if err.stops_iteration() => {
                        self.state = EntriesState::Done;
                        None
                    }
                    Err(err) => {
                        self.state = EntriesState::Done;
                        Some(Err(err))
                    }
                }
            }
        }
    }
}

impl Drop for Guide {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::Guide;
    use std::path::Path;

    #[test]
    fn maybe_filters_on_extension_only() {
        assert!(Guide::maybe(Path::new("FOO.NG")));
        assert!(Guide::maybe(Path::new("foo.ng")));
        assert!(!Guide::maybe(Path::new("foo.txt")));
        assert!(!Guide::maybe(Path::new("foo")));
    }
}
