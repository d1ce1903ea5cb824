mod support;
use support::{fixture, Person};

use pretty_assertions::assert_eq;
use sluice::{Result, Value};

#[test]
fn update_compiles_set_then_where() -> Result<()> {
    let (db, layer) = fixture();
    layer.set_affected(3);

    let affected = db
        .update::<Person>()
        .set(Person::last_name(), "Smith")?
        .set(Person::age(), 40)?
        .where_()?
        .equal(Person::personal_no(), "123")?
        .execute()?;

    assert_eq!(affected, 3);
    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "UPDATE Person c0 SET c0.lastName = :lastName_0, c0.age = :age_1 \
         WHERE c0.personalNo = :personalNo_2"
    );
    assert_eq!(recorded.params.len(), 3);
    assert_eq!(recorded.params[1].value(), &Value::from(40));
    Ok(())
}

#[test]
fn delete_compiles_and_reports_affected_rows() -> Result<()> {
    let (db, layer) = fixture();
    layer.set_affected(1);

    let affected = db
        .delete::<Person>()
        .where_()?
        .equal(Person::personal_no(), "123")?
        .execute()?;

    assert_eq!(affected, 1);
    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "DELETE FROM Person c0 WHERE c0.personalNo = :personalNo_0"
    );
    Ok(())
}

#[test]
fn update_without_where_touches_every_row() -> Result<()> {
    let (db, layer) = fixture();

    db.update::<Person>().set(Person::age(), 0)?.execute()?;

    let recorded = layer.last().unwrap();
    assert_eq!(recorded.sql, "UPDATE Person c0 SET c0.age = :age_0");
    Ok(())
}

#[test]
fn set_after_where_is_rejected() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db
        .update::<Person>()
        .set(Person::age(), 1)?
        .where_()?
        .equal(Person::personal_no(), "1")?
        .set(Person::age(), 2)
        .unwrap_err();
    assert!(err.is_invalid_statement());
    Ok(())
}

#[test]
fn set_on_a_select_stream_is_rejected() {
    let (db, _layer) = fixture();

    let err = db.select::<Person>().set(Person::age(), 1).unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn terminal_and_statement_kinds_must_agree() -> Result<()> {
    let (db, _layer) = fixture();

    let err = db
        .select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "1")?
        .execute()
        .unwrap_err();
    assert!(err.is_invalid_statement());

    let err = db
        .update::<Person>()
        .set(Person::age(), 1)?
        .to_list()
        .unwrap_err();
    assert!(err.is_invalid_statement());

    let err = db.delete::<Person>().where_()?.equal(Person::age(), 1)?.count().unwrap_err();
    assert!(err.is_invalid_statement());
    Ok(())
}
