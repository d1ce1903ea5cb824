mod support;
use support::{fixture, Person};

use pretty_assertions::assert_eq;
use sluice::{RecordingLayer, ResolverCaches, Result, Row, Sluice, Value};

fn canned_person() -> Row {
    [
        ("personalNo", Value::from("123")),
        ("lastName", Value::from("Smith")),
        ("age", Value::from(41)),
        ("born", Value::from("1984-05-01")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn to_list_maps_rows_into_entities() -> Result<()> {
    let layer = RecordingLayer::with_rows(vec![canned_person(), canned_person()]);
    let db = Sluice::new(layer.clone()).with_caches(ResolverCaches::new());

    let people = db
        .select::<Person>()
        .where_()?
        .equal(Person::last_name(), "Smith")?
        .to_list()?;

    assert_eq!(people.len(), 2);
    assert_eq!(people[0].personal_no, "123");
    assert_eq!(people[0].last_name, "Smith");
    assert_eq!(people[0].age, 41);
    assert!(people[0].phones.is_empty());
    Ok(())
}

#[test]
fn get_maps_the_first_row_if_any() -> Result<()> {
    let layer = RecordingLayer::with_rows(vec![canned_person()]);
    let db = Sluice::new(layer.clone()).with_caches(ResolverCaches::new());

    let person = db
        .select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "123")?
        .get()?;
    assert_eq!(person.unwrap().last_name, "Smith");

    let (db, _layer) = fixture();
    let person = db
        .select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "123")?
        .get()?;
    assert!(person.is_none());
    Ok(())
}

#[test]
fn mismatched_value_types_surface_as_conversion_errors() -> Result<()> {
    let bad: Row = [("age", Value::from("not-a-number"))].into_iter().collect();
    let layer = RecordingLayer::with_rows(vec![bad]);
    let db = Sluice::new(layer).with_caches(ResolverCaches::new());

    let err = db
        .select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "1")?
        .to_list()
        .unwrap_err();
    assert!(err.is_type_conversion());
    Ok(())
}
