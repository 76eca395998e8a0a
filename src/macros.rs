/// Generates the accessors every entry variant shares, assuming the struct
/// has a `header: EntryHeader` field and a `lines: Vec<String>` field.
macro_rules! entry_common {
    ($ty:ty) => {
        impl $ty {
            /// Byte offset where this entry's header starts.
            pub fn offset(&self) -> u64 {
                self.header.offset
            }

            pub fn type_id(&self) -> u16 {
                self.header.type_tag
            }

            /// Size, in bytes, of the entry's body as stored in the file.
            pub fn size(&self) -> u16 {
                self.header.size
            }

            pub fn len(&self) -> usize {
                self.lines.len()
            }

            pub fn is_empty(&self) -> bool {
                self.lines.is_empty()
            }

            pub fn has_see_also(&self) -> bool {
                self.header.has_see_also_flag != 0
            }

            pub fn parent(&self) -> &crate::entry::EntryParent {
                &self.header.parent
            }

            pub fn previous(&self) -> i64 {
                self.header.previous
            }

            pub fn has_previous(&self) -> bool {
                self.header.previous > 0
            }

            pub fn next(&self) -> i64 {
                self.header.next
            }

            pub fn has_next(&self) -> bool {
                self.header.next > 0
            }

            pub fn lines(&self) -> &[String] {
                &self.lines
            }
        }

        impl core::fmt::Display for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.lines.join("\n"))
            }
        }
    };
}
