mod support;
use support::{fixture, Person, Phone};

use pretty_assertions::assert_eq;
use sluice::{Result, Value};

#[test]
fn in_select_substitutes_a_complete_subquery() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .in_select::<Phone, _, _>(Person::last_name(), |c| {
            c.where_()?
                .equal(Phone::phone_number(), "100100")?
                .select(Phone::phone_number())
        })?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT c0 FROM Person c0 WHERE c0.lastName in \
         (SELECT c1.phoneNumber FROM Phone c1 WHERE c1.phoneNumber = :phoneNumber_0)"
    );
    assert_eq!(recorded.params.len(), 1);
    assert_eq!(recorded.params[0].name(), "phoneNumber_0");
    assert_eq!(recorded.params[0].value(), &Value::from("100100"));
    Ok(())
}

#[test]
fn not_in_select_negates_the_predicate() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .not_in_select::<Phone, _, _>(Person::last_name(), |c| {
            c.where_()?
                .equal(Phone::phone_number(), "1")?
                .select(Phone::phone_number())
        })?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert!(recorded.sql.contains("c0.lastName not in (SELECT c1.phoneNumber"));
    Ok(())
}

#[test]
fn subquery_params_stay_in_the_session_registry() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .equal(Person::personal_no(), "9")?
        .and()?
        .in_select::<Phone, _, _>(Person::last_name(), |c| {
            c.where_()?
                .equal(Phone::phone_number(), "100100")?
                .select(Phone::phone_number())
        })?
        .to_list()?;

    // One registry for the whole session: suffixes stay globally unique and
    // ordinals follow registration order across the nesting boundary.
    let recorded = layer.last().unwrap();
    assert_eq!(recorded.params.len(), 2);
    assert_eq!(recorded.params[0].name(), "personalNo_0");
    assert_eq!(recorded.params[1].name(), "phoneNumber_1");
    assert!(recorded.sql.contains(":phoneNumber_1"));
    Ok(())
}

#[test]
fn subquery_referencing_the_parent_reuses_its_alias() -> Result<()> {
    let (db, layer) = fixture();

    db.select::<Person>()
        .where_()?
        .in_select::<Phone, _, _>(Person::last_name(), |c| {
            c.where_()?
                .equal_field(Phone::owner_no(), Person::personal_no())?
                .select(Phone::phone_number())
        })?
        .to_list()?;

    let recorded = layer.last().unwrap();
    assert_eq!(
        recorded.sql,
        "SELECT c0 FROM Person c0 WHERE c0.lastName in \
         (SELECT c1.phoneNumber FROM Phone c1 WHERE c1.ownerNo = c0.personalNo)"
    );
    Ok(())
}
