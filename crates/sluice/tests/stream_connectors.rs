mod support;
use support::{fixture, Person};

use pretty_assertions::assert_eq;
use sluice::Result;

#[test]
fn consecutive_predicates_require_a_connector() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db
        .select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "1")?
        .equal(Person::last_name(), "Smith")
        .unwrap_err();
    assert!(err.is_misplaced_connector());
    Ok(())
}

#[test]
fn connector_with_nothing_to_connect_is_rejected() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db.select::<Person>().where_()?.and().unwrap_err();
    assert!(err.is_misplaced_connector());

    let (db, _layer) = fixture();
    let err = db
        .select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "1")?
        .and()?
        .or()
        .unwrap_err();
    assert!(err.is_misplaced_connector());
    Ok(())
}

#[test]
fn predicate_before_where_is_rejected() {
    let (db, _layer) = fixture();

    let err = db
        .select::<Person>()
        .equal(Person::personal_no(), "1")
        .unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn where_called_twice_is_rejected() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db.select::<Person>().where_()?.where_().unwrap_err();
    assert!(err.is_invalid_statement());
    Ok(())
}

#[test]
fn dangling_where_fails_at_finalize() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db.select::<Person>().where_()?.to_list().unwrap_err();
    assert!(err.is_misplaced_connector());
    Ok(())
}

#[test]
fn brackets_nest_and_render_in_place() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .open_bracket()?
        .equal(Person::personal_no(), "1")?
        .or()?
        .open_bracket()?
        .equal(Person::last_name(), "Smith")?
        .and()?
        .greater(Person::age(), 30)?
        .close_bracket()?
        .close_bracket()?
        .and()?
        .is_not_null(Person::personal_no())?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT c0 FROM Person c0 WHERE (c0.personalNo = :personalNo_0 \
         OR (c0.lastName = :lastName_1 AND c0.age > :age_2)) \
         AND c0.personalNo IS NOT NULL"
    );
    Ok(())
}

#[test]
fn close_without_open_is_rejected() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db
        .select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "1")?
        .close_bracket()
        .unwrap_err();
    assert!(err.is_unbalanced_brackets());
    Ok(())
}

#[test]
fn unterminated_open_fails_at_finalize() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db
        .select::<Person>()
        .where_()?
        .open_bracket()?
        .equal(Person::personal_no(), "1")?
        .to_list()
        .unwrap_err();
    assert!(err.is_unbalanced_brackets());
    Ok(())
}

#[test]
fn empty_brackets_are_rejected() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db
        .select::<Person>()
        .where_()?
        .open_bracket()?
        .close_bracket()
        .unwrap_err();
    assert!(err.is_unbalanced_brackets());
    Ok(())
}

#[test]
fn unresolvable_accessor_aborts_only_that_predicate() -> Result<()> {
    let (db, layer) = fixture();

    let stream = db.select::<Person>().where_()?;
    let err = stream.equal(sluice::Getter::<Person, String>::dynamic("bogus"), "1");
    assert!(err.unwrap_err().is_field_not_resolvable());

    // The session state is untouched by the failed predicate: a fresh stream
    // against the same layer still compiles cleanly.
    db.select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "1")?
        .to_list()?;
    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT c0 FROM Person c0 WHERE c0.personalNo = :personalNo_0"
    );
    Ok(())
}
