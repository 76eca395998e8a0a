//! Builds a small synthetic guide byte-for-byte and exercises the public
//! `Guide` API against it. Real `.ng`/`.eh` fixtures aren't shipped with
//! this crate, so these tests construct the wire format directly instead
//! of relying on an external binary.

use std::io::Write;

use ngdb::error::Error;
use ngdb::Guide;

const XOR_MASK: u8 = 0x1A;

fn xor(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| b ^ XOR_MASK).collect()
}

fn enc_word(v: u16) -> Vec<u8> {
    xor(&v.to_le_bytes())
}

fn enc_long(v: u32) -> Vec<u8> {
    xor(&v.to_le_bytes())
}

fn clear_field(text: &str, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    buf[..text.len()].copy_from_slice(text.as_bytes());
    buf
}

fn enc_strz(text: &str, len: usize) -> Vec<u8> {
    xor(&clear_field(text, len))
}

struct GuideBuilder {
    buf: Vec<u8>,
}

impl GuideBuilder {
    fn new(title: &str, credits: [&str; 5]) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"NG");
        buf.extend_from_slice(&[0, 0, 0, 0]); // unknown
        buf.extend_from_slice(&0u16.to_le_bytes()); // menu_count
        buf.extend_from_slice(&clear_field(title, 40));
        for line in credits {
            buf.extend_from_slice(&clear_field(line, 66));
        }
        GuideBuilder { buf }
    }

    fn position(&self) -> u64 {
        self.buf.len() as u64
    }

    /// Writes the entry's fixed 26-byte header, leaving the body-size word
    /// as a zeroed placeholder, and returns that word's offset in `buf` so
    /// the caller can backfill it once the entry's body has been written.
    fn push_header(&mut self, type_tag: u16, line_count: u16, has_see_also: u16, parent_line: i32, parent_offset: i64, previous: i64, next: i64) -> usize {
        self.buf.extend(enc_word(type_tag));
        let size_pos = self.buf.len();
        self.buf.extend(enc_word(0)); // body size, backfilled by patch_body_size
        self.buf.extend(enc_word(line_count));
        self.buf.extend(enc_word(has_see_also));
        self.buf.extend(enc_word(parent_line as u16));
        self.buf.extend(enc_long(parent_offset as u32));
        self.buf.extend(enc_word(0xFFFF)); // parent.menu: absent
        self.buf.extend(enc_word(0xFFFF)); // parent.prompt: absent
        self.buf.extend(enc_long(previous as u32));
        self.buf.extend(enc_long(next as u32));
        size_pos
    }

    /// `Reader::skip_entry` reads this word and skips `size + 22` bytes past
    /// it to land on the next entry, so it must equal the number of bytes
    /// written after the fixed 22-byte header remainder, i.e. the body.
    fn patch_body_size(&mut self, size_pos: usize) {
        let body_len = (self.buf.len() - size_pos - 2 - 22) as u16;
        self.buf[size_pos..size_pos + 2].copy_from_slice(&enc_word(body_len));
    }

    fn push_short(&mut self, line_text: &str, target_offset: u32) {
        let size_pos = self.push_header(0, 1, 0, -1, -1, -1, -1);
        self.buf.extend([0, 0]); // skipped per-line word
        self.buf.extend(enc_long(target_offset));
        self.buf.extend(enc_strz(line_text, 1024));
        self.patch_body_size(size_pos);
    }

    fn push_long(
        &mut self,
        line_text: &str,
        parent_line: i32,
        parent_offset: i64,
        previous: i64,
        see_also_offset: u32,
        see_also_prompt: &str,
    ) {
        let size_pos = self.push_header(1, 1, 1, parent_line, parent_offset, previous, -1);
        self.buf.extend(enc_strz(line_text, 1024));
        self.buf.extend(enc_word(1)); // see-also count
        self.buf.extend(enc_long(see_also_offset));
        self.buf.extend(enc_strz(see_also_prompt, 128));
        self.patch_body_size(size_pos);
    }

    fn write_to(self, path: &std::path::Path) {
        std::fs::File::create(path)
            .unwrap()
            .write_all(&self.buf)
            .unwrap();
    }
}

#[test]
fn header_and_entries_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ng");

    let mut builder = GuideBuilder::new(
        "Test Guide",
        ["Test Guide", "Copyright nobody", "", "", ""],
    );
    let first_entry = builder.position();
    let short_offset = builder.position();
    builder.push_short(" OL_95AppTitle()", 999);
    let long_offset = builder.position();
    builder.push_long(
        " ^bOL_95AppTitle()",
        0,
        short_offset as i64,
        short_offset as i64,
        long_offset + 1,
        "OL_95VMTitle()",
    );
    builder.write_to(&path);

    let mut guide = Guide::open(&path).unwrap();
    assert!(guide.is_a());
    assert_eq!(guide.made_with(), "Norton Guide");
    assert_eq!(guide.title(), "Test Guide");
    assert_eq!(guide.credits()[0], "Test Guide");
    assert_eq!(guide.menu_count(), 0);
    assert!(guide.menus().is_empty());
    assert_eq!(guide.first_entry_offset(), first_entry);

    let entries: Vec<_> = guide.entries().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(entries.len(), 2);

    let short = entries[0].as_short().expect("first entry is short");
    assert_eq!(short.type_id(), 0);
    assert_eq!(short.offset(), short_offset);
    assert!(!short.parent().is_present());
    assert!(!short.has_previous());
    assert!(!short.has_next());
    assert_eq!(short.get(0).unwrap().text(), " OL_95AppTitle()");
    assert_eq!(short.get(0).unwrap().offset(), 999);

    let long = entries[1].as_long().expect("second entry is long");
    assert_eq!(long.type_id(), 1);
    assert!(long.parent().is_present());
    assert_eq!(long.parent().line(), 0);
    assert!(long.has_previous());
    assert!(!long.has_next());
    assert_eq!(long.get(0).unwrap(), " ^bOL_95AppTitle()");
    assert!(long.has_see_also());
    assert_eq!(long.see_also().len(), 1);
    assert_eq!(long.see_also().get(0).unwrap().text(), "OL_95VMTitle()");
}

#[test]
fn load_restores_cursor_and_skip_advances_past_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ng");

    let mut builder = GuideBuilder::new("G", ["", "", "", "", ""]);
    let short_offset = builder.position();
    builder.push_short("line", 0);
    builder.write_to(&path);

    let mut guide = Guide::open(&path).unwrap();

    // load() must not move the cursor: loading twice from the same spot
    // yields an identical entry both times.
    guide.goto(short_offset).unwrap();
    let first = guide.load().unwrap();
    let second = guide.load().unwrap();
    assert_eq!(first.offset(), second.offset());
    assert_eq!(first.to_string(), second.to_string());

    // skip() advances past the whole entry, landing exactly at EOF.
    guide.goto(short_offset).unwrap().skip().unwrap();
    assert!(guide.eof().unwrap());
}

#[test]
fn load_and_skip_fail_at_eof() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.ng");

    let builder = GuideBuilder::new("G", ["", "", "", "", ""]);
    builder.write_to(&path);

    let mut guide = Guide::open(&path).unwrap();
    assert!(guide.eof().unwrap());
    assert!(matches!(guide.load().unwrap_err(), Error::Eof));
    assert!(matches!(guide.skip().unwrap_err(), Error::Eof));
}

#[test]
fn maybe_does_not_touch_the_filesystem() {
    assert!(Guide::maybe(std::path::Path::new("anything.NG")));
    assert!(!Guide::maybe(std::path::Path::new("anything.txt")));
}
