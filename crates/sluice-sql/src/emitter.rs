#[macro_use]
mod fmt;
use fmt::Emit;

mod delim;
use delim::Comma;

mod flavor;
pub use flavor::Flavor;

mod ident;
use ident::{Ident, Qualified};

mod op;
pub use op::{Cmp, JoinKind, Pattern};

mod placeholder;
use placeholder::Placeholder;

pub mod fragment;

/// Appends query text to one of a stream's buffers, handling the flavor
/// differences between JPQL-style entity queries and plain SQL.
#[derive(Debug)]
pub struct SqlWriter<'a> {
    /// Where to write the serialized text
    dst: &'a mut String,

    /// The active dialect flavor
    flavor: Flavor,
}

impl<'a> SqlWriter<'a> {
    pub fn new(dst: &'a mut String, flavor: Flavor) -> Self {
        SqlWriter { dst, flavor }
    }

    pub fn push(&mut self, text: &str) {
        self.dst.push_str(text);
    }
}
