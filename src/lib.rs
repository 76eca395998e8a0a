//! A reader for Norton Guide and Expert Help database files.
//!
//! Norton Guide (and its IBM-branded sibling, Expert Help) was a DOS-era
//! help database format: a header with a title and credits, a handful of
//! top-level menus, and a flat stream of short (index-like) and long
//! (prose) entries, each written in a small `^`-prefixed markup dialect.
//!
//! ```no_run
//! use ngdb::Guide;
//!
//! # fn main() -> ngdb::error::Result<()> {
//! let mut guide = Guide::open("OSLIB.NG")?;
//! if guide.is_a() {
//!     println!("{} ({})", guide.title(), guide.made_with());
//!     for entry in guide.entries() {
//!         let entry = entry?;
//!         println!("{entry}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod dosify;
pub mod entry;
pub mod error;
pub mod guide;
pub mod link;
pub mod menu;
pub mod parser;
pub mod prompts;
pub mod reader;
pub mod seealso;
pub mod types;

pub use entry::{Entry, EntryParent, Long, Short};
pub use error::{Error, Result};
pub use guide::Guide;
pub use link::Link;
pub use menu::Menu;
pub use parser::{MarkupText, MarkupVisitor, PlainText, RichTags, RichText, Tag};
pub use seealso::SeeAlso;
