use super::{Emit, Flavor, SqlWriter};

/// An identifier, quoted when the SQL flavor requires it.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> Emit for Ident<S> {
    fn emit(self, w: &mut SqlWriter<'_>) {
        match w.flavor {
            Flavor::Jpql => w.dst.push_str(self.0.as_ref()),
            Flavor::Sql => {
                w.dst.push('"');
                w.dst.push_str(self.0.as_ref());
                w.dst.push('"');
            }
        }
    }
}

/// An alias-qualified field reference, e.g. `c0.personalNo`. Embedded paths
/// contain dots; each segment is quoted separately under the SQL flavor.
pub(super) struct Qualified<'a> {
    pub(super) alias: &'a str,
    pub(super) field: &'a str,
}

impl Emit for Qualified<'_> {
    fn emit(self, w: &mut SqlWriter<'_>) {
        w.dst.push_str(self.alias);
        for segment in self.field.split('.') {
            w.dst.push('.');
            emit!(w, Ident(segment));
        }
    }
}
