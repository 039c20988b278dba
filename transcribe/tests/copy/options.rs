use transcribe::{
    ErrorKind, FieldNameMapping, Options, Reflect, Typed, TypeConverter, copy, copy_with_options,
};
use transcribe_testhelpers::{IPanic, test};

use super::fixtures::{Employee, User};

#[derive(Clone, Debug, Default, Reflect)]
pub struct User1 {
    pub id: i64,
    pub name: String,
    pub address: Vec<String>,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct User2 {
    pub id2: i64,
    pub name2: String,
    pub address2: Vec<String>,
}

#[test]
fn field_name_mapping() -> Result<(), IPanic> {
    let from = User1 {
        id: 1,
        name: "Jinzhu".into(),
        address: vec!["a".into(), "b".into()],
    };
    let options = Options::new().field_name_mapping(FieldNameMapping::new::<User1, User2>([
        ("id", "id2"),
        ("name", "name2"),
        ("address", "address2"),
    ]));

    let mut to = User2::default();
    copy_with_options(&mut to, &from, &options)?;
    assert_eq!(to.id2, 1);
    assert_eq!(to.name2, "Jinzhu");
    assert_eq!(to.address2, from.address);

    // mappings only apply to the pair of types they were declared for
    let mut back = User1::default();
    copy_with_options(&mut back, &to, &options)?;
    assert_eq!(back.id, 0);
    assert!(back.name.is_empty());
    Ok(())
}

#[test]
fn ignore_empty_keeps_destination_values() -> Result<(), IPanic> {
    let mut from = User::default();
    from.name = "Jinzhu".into();
    let mut to = Employee {
        name: "old".into(),
        age: 30,
        nickname: Some("nick".into()),
        super_rule: "Super Dev".into(),
        ..Employee::default()
    };

    copy_with_options(&mut to, &from, &Options::new().ignore_empty(true))?;
    assert_eq!(to.name, "Jinzhu");
    assert_eq!(to.age, 30);
    assert_eq!(to.nickname.as_deref(), Some("nick"));
    assert_eq!(to.super_rule, "Super Dev");

    copy(&mut to, &from)?;
    assert_eq!(to.age, 0);
    assert_eq!(to.nickname.as_deref(), Some(""));
    assert_eq!(to.super_rule, "Super ");
    Ok(())
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Raw {
    pub count: String,
    pub ratio: i32,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Parsed {
    pub count: i64,
    pub ratio: i64,
}

fn parsing() -> TypeConverter {
    TypeConverter::new::<String, i64>(|s| Ok(s.parse()?))
}

#[test]
fn converters_take_priority() -> Result<(), IPanic> {
    let options = Options::new()
        .converter(parsing())
        .converter(TypeConverter::new::<i32, i64>(|n| Ok(i64::from(*n) * 100)));

    let mut to = Parsed::default();
    copy_with_options(
        &mut to,
        &Raw {
            count: "42".into(),
            ratio: 3,
        },
        &options,
    )?;
    assert_eq!(to.count, 42);
    assert_eq!(to.ratio, 300);

    let mut without = Parsed::default();
    let err = copy(
        &mut without,
        &Raw {
            count: "42".into(),
            ratio: 3,
        },
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.path().to_string(), "count");
    Ok(())
}

#[test]
fn converter_errors_abort_the_copy() {
    let options = Options::new().converter(parsing());

    let mut to = Parsed::default();
    let err = copy_with_options(
        &mut to,
        &Raw {
            count: "many".into(),
            ratio: 1,
        },
        &options,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConversionFailed);
    assert_eq!(err.path().to_string(), "count");
    assert!(err.cause().is_some());
}

#[test]
fn untyped_converter_must_return_the_destination_type() {
    let options = Options::new().converter(TypeConverter::from_dyn(
        String::SHAPE,
        i64::SHAPE,
        |_| Ok(Box::new(1u8) as Box<dyn Reflect>),
    ));

    let mut to = Parsed::default();
    let err = copy_with_options(
        &mut to,
        &Raw {
            count: "1".into(),
            ratio: 1,
        },
        &options,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConversionFailed);
    assert_eq!(to.count, 0);
}
