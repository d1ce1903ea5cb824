/// The dialect the compiled text targets.
///
/// `Jpql` renders entity and property names (`FROM Person c0 WHERE
/// c0.personalNo = :personalNo_0`); `Sql` renders table and column names and
/// quotes identifiers. Placeholders are named in both flavors; the query
/// layer translates them if its backend binds positionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flavor {
    #[default]
    Jpql,
    Sql,
}

impl Flavor {
    pub fn is_jpql(&self) -> bool {
        matches!(self, Flavor::Jpql)
    }
}
