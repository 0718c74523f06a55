//! Tests for `#[derive(Record)]`.

use rust_decimal::Decimal;
use sift::{parse, Criteria, FilterExt, Number, Range, Record, Value};
use sift_macros::Record as DeriveRecord;

#[derive(DeriveRecord)]
struct Person {
    first_name: String,
    favorite_number: i32,

    #[record(rename = "letter")]
    favorite_letter: char,

    nickname: Option<String>,
    balance: Decimal,
    active: bool,

    #[record(skip)]
    #[allow(dead_code)]
    notes: Vec<String>,
}

fn people() -> Vec<Person> {
    vec![
        Person {
            first_name: "John".into(),
            favorite_number: 5,
            favorite_letter: 'a',
            nickname: None,
            balance: Decimal::new(1050, 2),
            active: true,
            notes: vec![],
        },
        Person {
            first_name: "Tim".into(),
            favorite_number: 10,
            favorite_letter: 'b',
            nickname: Some("Timmy".into()),
            balance: Decimal::new(-20, 0),
            active: false,
            notes: vec!["new".into()],
        },
    ]
}

#[test]
fn generates_field_constants() {
    assert_eq!(Person::FIRST_NAME, "first_name");
    assert_eq!(Person::FAVORITE_NUMBER, "favorite_number");
    assert_eq!(Person::LETTER, "letter");
    assert_eq!(Person::NICKNAME, "nickname");
}

#[test]
fn field_values() {
    let people = people();
    let john = &people[0];

    assert_eq!(john.field_value("first_name"), Value::String("John"));
    assert_eq!(
        john.field_value("favorite_number"),
        Value::Number(Number::I64(5))
    );
    assert_eq!(john.field_value("letter"), Value::Char('a'));
    assert_eq!(john.field_value("nickname"), Value::Null);
    assert_eq!(john.field_value("balance"), Value::Decimal(Decimal::new(1050, 2)));
    assert_eq!(john.field_value("active"), Value::Bool(true));
    assert_eq!(people[1].field_value("nickname"), Value::String("Timmy"));
}

#[test]
fn renamed_and_skipped_fields_are_unknown() {
    let people = people();
    assert!(people[0].field_value("favorite_letter").is_none());
    assert!(people[0].field_value("notes").is_none());
    assert!(people[0].field_value("FIRST_NAME").is_none());
}

#[test]
fn filters_with_derived_accessor() {
    let people = people();

    let criteria = Criteria::new()
        .range(Person::FAVORITE_NUMBER, parse::<u8>("[5,5]").unwrap())
        .constant(Person::LETTER, 'a')
        .build();
    let found: Vec<&str> = criteria
        .filter(&people, Person::accessor)
        .map(|p| p.first_name.as_str())
        .collect();
    assert_eq!(found, ["John"]);

    let criteria = Criteria::new().constant("notes", "new").build();
    assert_eq!(people.iter().filter_by(&criteria).count(), 2);
}

#[test]
fn decimal_and_bool_fields() {
    let people = people();

    let criteria = Criteria::new()
        .range("balance", Range::at_least(0i32))
        .build();
    assert_eq!(criteria.find(&people, Person::accessor).map(|p| p.favorite_number), Some(5));

    let criteria = Criteria::new().constant("active", false).build();
    assert_eq!(criteria.position(&people, Person::accessor), Some(1));
}

#[test]
fn optional_field_null_is_rejected() {
    let people = people();
    let criteria = Criteria::new()
        .collection(Person::NICKNAME, ["Timmy", "Johnny"])
        .build();
    let found: Vec<i32> = people.iter().filter_by(&criteria).map(|p| p.favorite_number).collect();
    assert_eq!(found, [10]);
}
