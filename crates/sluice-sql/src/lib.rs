pub mod emitter;
pub use emitter::{fragment, Cmp, Flavor, JoinKind, Pattern, SqlWriter};
