use super::{Emit, SqlWriter};

/// Comma delimited
pub(super) struct Comma<L>(pub(super) L);

impl<L> Emit for Comma<L>
where
    L: IntoIterator,
    L::Item: Emit,
{
    fn emit(self, w: &mut SqlWriter<'_>) {
        let mut s = "";
        for i in self.0 {
            emit!(w, s, i);
            s = ", ";
        }
    }
}
