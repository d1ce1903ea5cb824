use super::{Emit, SqlWriter};

/// A named parameter placeholder, always rendered as `:name`. Layers whose
/// backend binds positionally translate by ordinal.
pub(super) struct Placeholder<'a>(pub(super) &'a str);

impl Emit for Placeholder<'_> {
    fn emit(self, w: &mut SqlWriter<'_>) {
        w.dst.push(':');
        w.dst.push_str(self.0);
    }
}
