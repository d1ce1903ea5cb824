mod support;
use support::{fixture, Person};

use pretty_assertions::assert_eq;
use sluice::{Result, Value};

#[test]
fn equal_and_like_compile_with_unique_params() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "123")?
        .and()?
        .like(Person::last_name(), "Smith")?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT c0 FROM Person c0 WHERE c0.personalNo = :personalNo_0 \
         AND c0.lastName like :lastName_1"
    );

    assert_eq!(recorded.params.len(), 2);
    assert_eq!(recorded.params[0].name(), "personalNo_0");
    assert_eq!(recorded.params[0].value(), &Value::from("123"));
    assert_eq!(recorded.params[0].ordinal(), 0);
    assert_eq!(recorded.params[1].name(), "lastName_1");
    assert_eq!(recorded.params[1].value(), &Value::from("Smith"));
    assert_eq!(recorded.params[1].ordinal(), 1);
    Ok(())
}

#[test]
fn every_placeholder_occurs_exactly_once() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "1")?
        .and()?
        .greater(Person::age(), 30)?
        .or()?
        .not_equal(Person::last_name(), "Smith")?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(recorded.params.len(), 3);
    for param in &recorded.params {
        let placeholder = format!(":{}", param.name());
        assert_eq!(
            recorded.sql.matches(&placeholder).count(),
            1,
            "placeholder {placeholder} must occur exactly once in {}",
            recorded.sql
        );
    }
    Ok(())
}

#[test]
fn wildcard_sugar_mangles_the_pattern_value() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .starts_with(Person::last_name(), "Smi")?
        .and()?
        .ends_with(Person::last_name(), "ith")?
        .and()?
        .contains(Person::last_name(), "mit")?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(recorded.params[0].value(), &Value::from("Smi%"));
    assert_eq!(recorded.params[1].value(), &Value::from("%ith"));
    assert_eq!(recorded.params[2].value(), &Value::from("%mit%"));
    assert!(recorded.sql.contains("c0.lastName like :lastName_0"));
    Ok(())
}

#[test]
fn unary_and_sequence_predicates() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .is_null(Person::last_name())?
        .or()?
        .is_not_null(Person::personal_no())?
        .and()?
        .in_list(Person::age(), [30, 40])?
        .and()?
        .not_in_list(Person::personal_no(), ["1", "2"])?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT c0 FROM Person c0 WHERE c0.lastName IS NULL \
         OR c0.personalNo IS NOT NULL \
         AND c0.age in (:age_0, :age_1) \
         AND c0.personalNo not in (:personalNo_2, :personalNo_3)"
    );
    assert_eq!(recorded.params.len(), 4);
    Ok(())
}

#[test]
fn temporal_fields_tag_their_parameters() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .equal(Person::born(), "1990-01-01")?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.params[0].temporal_type(),
        Some(sluice::TemporalType::Date)
    );
    Ok(())
}

#[test]
fn caller_supplied_root_alias() -> Result<()> {
    let (db, layer) = fixture();

    db.select_as::<Person>("p")
        .where_()?
        .equal(Person::personal_no(), "123")?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT p FROM Person p WHERE p.personalNo = :personalNo_0"
    );
    Ok(())
}

#[test]
fn field_to_field_predicates_emit_no_placeholder() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .equal_field(Person::personal_no(), Person::last_name())?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT c0 FROM Person c0 WHERE c0.personalNo = c0.lastName"
    );
    assert!(recorded.params.is_empty());
    Ok(())
}
