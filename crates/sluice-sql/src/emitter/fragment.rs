//! Fragment writers used by the stream compiler. Each appends one clause
//! shape to a stream buffer; the buffers' ordering and connector state are
//! the stream's concern, not ours.

use super::{Cmp, Comma, Emit, Flavor, Ident, JoinKind, Placeholder, Qualified, SqlWriter};

use sluice_core::{AggregateFunction, AggregateTuple};

/// `<alias>.<field>`
pub fn qualified(dst: &mut String, flavor: Flavor, alias: &str, field: &str) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(w, Qualified { alias, field });
}

/// `<alias>.<field> <op> :<param>`
pub fn comparison(
    dst: &mut String,
    flavor: Flavor,
    alias: &str,
    field: &str,
    cmp: Cmp,
    param: &str,
) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(w, Qualified { alias, field }, " ", cmp, " ", Placeholder(param));
}

/// `<alias>.<field> <op> <rhsAlias>.<rhsField>` — field-to-field predicates
/// emit the other side's qualified name instead of a placeholder.
pub fn field_comparison(
    dst: &mut String,
    flavor: Flavor,
    alias: &str,
    field: &str,
    cmp: Cmp,
    rhs_alias: &str,
    rhs_field: &str,
) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(
        w,
        Qualified { alias, field },
        " ",
        cmp,
        " ",
        Qualified { alias: rhs_alias, field: rhs_field },
    );
}

/// `<alias>.<field> like :<param>`
pub fn like(dst: &mut String, flavor: Flavor, alias: &str, field: &str, param: &str) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(w, Qualified { alias, field }, " like ", Placeholder(param));
}

/// `<alias>.<field> IS [NOT] NULL`
pub fn is_null(dst: &mut String, flavor: Flavor, alias: &str, field: &str, negate: bool) {
    let w = &mut SqlWriter::new(dst, flavor);
    let suffix = if negate { " IS NOT NULL" } else { " IS NULL" };
    emit!(w, Qualified { alias, field }, suffix);
}

/// `<alias>.<field> [not ]in (:<p0>, :<p1>, ...)`
pub fn in_params(
    dst: &mut String,
    flavor: Flavor,
    alias: &str,
    field: &str,
    params: &[String],
    negate: bool,
) {
    let w = &mut SqlWriter::new(dst, flavor);
    let kw = if negate { " not in (" } else { " in (" };
    let placeholders = Comma(params.iter().map(|name| Placeholder(name.as_str())));
    emit!(w, Qualified { alias, field }, kw, placeholders, ")");
}

/// `<alias>.<field> [not ]in (<subquery>)`
pub fn in_subquery(
    dst: &mut String,
    flavor: Flavor,
    alias: &str,
    field: &str,
    subquery: &str,
    negate: bool,
) {
    let w = &mut SqlWriter::new(dst, flavor);
    let kw = if negate { " not in (" } else { " in (" };
    emit!(w, Qualified { alias, field }, kw, subquery, ")");
}

/// `<JOIN-TYPE> JOIN <parentAlias>.<collectionField> <childAlias> [ON <on>]`
pub fn join_clause(
    dst: &mut String,
    flavor: Flavor,
    kind: JoinKind,
    parent_alias: &str,
    collection_field: &str,
    child_alias: &str,
    on: Option<&str>,
) {
    let w = &mut SqlWriter::new(dst, flavor);
    let on = on.map(|on| (" ON ", on));
    emit!(
        w,
        kind.keyword(),
        " ",
        Qualified { alias: parent_alias, field: collection_field },
        " ",
        child_alias,
        on,
    );
}

/// `SELECT <projection> FROM <source> <alias>`
pub fn select_head(dst: &mut String, flavor: Flavor, projection: &str, source: &str, alias: &str) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(w, "SELECT ", projection, " FROM ", Ident(source), " ", alias);
}

/// `UPDATE <source> <alias>`
pub fn update_head(dst: &mut String, flavor: Flavor, source: &str, alias: &str) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(w, "UPDATE ", Ident(source), " ", alias);
}

/// `DELETE FROM <source> <alias>`
pub fn delete_head(dst: &mut String, flavor: Flavor, source: &str, alias: &str) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(w, "DELETE FROM ", Ident(source), " ", alias);
}

/// ` SET <alias>.<field> = :<param>` for the first clause, `, ...` after.
pub fn set_clause(
    dst: &mut String,
    flavor: Flavor,
    first: bool,
    alias: &str,
    field: &str,
    param: &str,
) {
    let w = &mut SqlWriter::new(dst, flavor);
    let lead = if first { " SET " } else { ", " };
    emit!(w, lead, Qualified { alias, field }, " = ", Placeholder(param));
}

/// `<FUNC>(<alias>.<field>) <op> :<param>` — a HAVING comparison.
pub fn having(
    dst: &mut String,
    flavor: Flavor,
    alias: &str,
    field: &str,
    function: AggregateFunction,
    cmp: Cmp,
    param: &str,
) {
    let w = &mut SqlWriter::new(dst, flavor);
    emit!(
        w,
        function.as_str(),
        "(",
        Qualified { alias, field },
        ") ",
        cmp,
        " ",
        Placeholder(param),
    );
}

/// `<FUNC>(<alias>.<field>)[ AS <outputAlias>]`
pub fn aggregate(dst: &mut String, flavor: Flavor, alias: &str, tuple: &AggregateTuple) {
    let w = &mut SqlWriter::new(dst, flavor);
    let output = tuple.output_alias().map(|output| (" AS ", output));
    emit!(
        w,
        tuple.function().as_str(),
        "(",
        Qualified { alias, field: tuple.field() },
        ")",
        output,
    );
}
