use std::time::{Duration, SystemTime};

use transcribe::{Options, Reflect, Typed, copy, copy_with_options};
use transcribe_testhelpers::{IPanic, test};

use super::fixtures::{Employee, User, check_employee};

#[test]
fn copy_struct_through_references_and_pointers() -> Result<(), IPanic> {
    let mut user = User::new("Jinzhu", 18, "Admin", &["hello world", "welcome"]);
    user.birthday = Some(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000));

    let mut employee = Employee::default();
    copy(&mut employee, &user)?;
    check_employee(&employee, &user);

    let mut from_box = Employee::default();
    copy(&mut from_box, &Box::new(Box::new(user.clone())))?;
    check_employee(&from_box, &user);

    let mut into_option: Option<Box<Employee>> = None;
    copy(&mut into_option, &user)?;
    check_employee(into_option.as_deref().expect("allocated"), &user);

    let mut into_box = Box::new(Employee::default());
    copy(&mut into_box, &employee)?;
    check_employee(&into_box, &user);
    Ok(())
}

#[test]
fn same_struct_copies_private_fields() -> Result<(), IPanic> {
    let user = User::new("Jinzhu", 18, "Admin", &["hello world"]);
    let mut copied = User::default();
    copy(&mut copied, &user)?;

    assert_eq!(copied, user);
    assert_eq!(copied.flags(), b"x");
    Ok(())
}

#[test]
fn getter_feeds_field_and_setter_receives_field() -> Result<(), IPanic> {
    let user = User::new("Jinzhu", 21, "Admin", &[]);
    let mut employee = Employee::default();
    copy(&mut employee, &user)?;

    assert_eq!(employee.double_age, 42);
    assert_eq!(employee.super_rule, "Super Admin");
    Ok(())
}

#[test]
fn copy_struct_into_list() -> Result<(), IPanic> {
    let user = User::new("Jinzhu", 18, "Admin", &["hello world"]);

    let mut employees: Vec<Employee> = vec![Employee::default(), Employee::default()];
    copy(&mut employees, &user)?;
    assert_eq!(employees.len(), 1);
    check_employee(&employees[0], &user);

    let mut boxed: Vec<Box<Employee>> = Vec::new();
    copy(&mut boxed, &user)?;
    assert_eq!(boxed.len(), 1);
    check_employee(&boxed[0], &user);

    let mut wrapped: Option<Vec<Option<Employee>>> = None;
    copy(&mut wrapped, &user)?;
    let wrapped = wrapped.expect("allocated");
    check_employee(wrapped[0].as_ref().expect("allocated"), &user);
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct Base {
    pub base_field1: i32,
    pub base_field2: i32,
    pub user: Option<Box<User>>,
}

#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct Embed {
    pub embed_field1: i32,
    pub embed_field2: i32,
    #[reflect(flatten)]
    pub base: Base,
}

#[test]
fn flattened_fields_are_promoted_both_ways() -> Result<(), IPanic> {
    let mut embedded = Embed {
        embed_field1: 3,
        embed_field2: 4,
        base: Base {
            base_field1: 1,
            base_field2: 2,
            user: Some(Box::new(User::new("testName", 1, "", &[]))),
        },
    };

    let mut base = Base::default();
    copy(&mut base, &embedded)?;
    assert_eq!(base.base_field1, 1);
    assert_eq!(base.user.as_ref().map(|u| u.name.as_str()), Some("testName"));

    base.base_field1 = 11;
    base.base_field2 = 12;
    base.user = Some(Box::new(User::new("testName1", 1, "", &[])));
    copy(&mut embedded, &base)?;
    assert_eq!(embedded.base.base_field1, 11);
    assert_eq!(embedded.base.base_field2, 12);
    assert_eq!(
        embedded.base.user.as_ref().map(|u| u.name.as_str()),
        Some("testName1")
    );
    assert_eq!(embedded.embed_field1, 3);
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct Nested {
    pub a: String,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct HiddenPointerA {
    #[reflect(flatten)]
    nested: Option<Box<Nested>>,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct HiddenPointerB {
    #[reflect(flatten)]
    nested: Option<Box<Nested>>,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct HiddenA {
    #[reflect(flatten)]
    nested: Nested,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct HiddenB {
    #[reflect(flatten)]
    nested: Nested,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct ExposedPointerA {
    #[reflect(flatten)]
    pub nested: Option<Box<Nested>>,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct ExposedPointerB {
    #[reflect(flatten)]
    pub nested: Option<Box<Nested>>,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Plain {
    pub a: String,
}

#[test]
fn private_flattened_pointer_is_never_allocated() -> Result<(), IPanic> {
    let from = HiddenPointerA {
        nested: Some(Box::new(Nested { a: "a".into() })),
    };
    let mut to = HiddenPointerB::default();
    copy_with_options(&mut to, &from, &Options::new().deep_copy(true))?;

    assert!(to.nested.is_none());
    Ok(())
}

#[test]
fn private_flattened_value_is_filled() -> Result<(), IPanic> {
    let from = HiddenA {
        nested: Nested { a: "a".into() },
    };
    let mut to = HiddenB::default();
    copy_with_options(&mut to, &from, &Options::new().deep_copy(true))?;

    assert_eq!(to.nested.a, "a");
    Ok(())
}

#[test]
fn exported_flattened_pointer_is_allocated() -> Result<(), IPanic> {
    let from = ExposedPointerA {
        nested: Some(Box::new(Nested { a: "a".into() })),
    };
    let mut to = ExposedPointerB::default();
    copy_with_options(&mut to, &from, &Options::new().deep_copy(true))?;
    assert_eq!(to.nested.as_deref(), Some(&Nested { a: "a".into() }));

    let mut to = ExposedPointerB::default();
    copy_with_options(&mut to, &Plain { a: "a".into() }, &Options::new().deep_copy(true))?;
    assert_eq!(to.nested.map(|n| n.a), Some("a".to_string()));
    Ok(())
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct NestedSource {
    pub id: i32,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Source {
    #[reflect(flatten)]
    pub nested_source: Option<Box<NestedSource>>,
    pub title: String,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Destination {
    pub id: i32,
    pub title: String,
}

#[test]
fn absent_flattened_source_is_skipped() -> Result<(), IPanic> {
    let from = Source {
        nested_source: None,
        title: "A title to be copied".into(),
    };
    let mut to = Destination {
        id: 7,
        title: String::new(),
    };
    copy(&mut to, &from)?;

    assert_eq!(to.title, from.title);
    assert_eq!(to.id, 7);
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct HasPrivate {
    data: i32,
}

#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct HasMembers {
    pub member: HasPrivate,
}

#[test]
fn nested_private_data_survives_shallow_and_deep_copies() -> Result<(), IPanic> {
    let src = HasMembers {
        member: HasPrivate { data: 42 },
    };

    let mut shallow = HasMembers {
        member: HasPrivate { data: 0 },
    };
    copy(&mut shallow, &src)?;
    assert_eq!(shallow, src);

    let mut deep = HasMembers {
        member: HasPrivate { data: 0 },
    };
    copy_with_options(&mut deep, &src, &Options::new().deep_copy(true))?;
    assert_eq!(deep, src);
    Ok(())
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct TaggedSource {
    #[reflect(rename = "Label")]
    pub title: String,
    #[reflect(skip)]
    pub cache: Vec<u8>,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct TaggedDestination {
    pub label: String,
    pub title: String,
    pub cache: Vec<u8>,
}

#[test]
fn renamed_and_skipped_fields() -> Result<(), IPanic> {
    let from = TaggedSource {
        title: "hello".into(),
        cache: vec![1, 2, 3],
    };
    let mut to = TaggedDestination::default();
    copy(&mut to, &from)?;

    assert_eq!(to.label, "hello");
    assert_eq!(to.title, "");
    assert!(to.cache.is_empty());
    Ok(())
}

#[derive(Clone, Debug, Reflect)]
pub struct Timestamps {
    pub t1: SystemTime,
    pub t2: Option<SystemTime>,
    pub t3: Option<SystemTime>,
    pub t4: SystemTime,
    pub t5: SystemTime,
    pub t6: SystemTime,
}

#[derive(Clone, Debug, Reflect)]
pub struct EmbedT1 {
    pub t5: SystemTime,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct EmbedT2 {
    pub t6: Option<SystemTime>,
}

#[derive(Clone, Debug, Reflect)]
pub struct ReshapedTimestamps {
    pub t1: SystemTime,
    pub t2: Option<SystemTime>,
    pub t3: SystemTime,
    pub t4: Option<SystemTime>,
    #[reflect(flatten)]
    embed_t1: EmbedT1,
    #[reflect(flatten)]
    embed_t2: EmbedT2,
}

#[test]
fn times_move_between_plain_optional_and_promoted_fields() -> Result<(), IPanic> {
    let at = |secs: u64| SystemTime::UNIX_EPOCH + Duration::from_secs(secs);
    let from = Timestamps {
        t1: at(1),
        t2: Some(at(2)),
        t3: Some(at(3)),
        t4: at(4),
        t5: at(5),
        t6: at(6),
    };
    let mut to = ReshapedTimestamps::zero();
    copy_with_options(&mut to, &from, &Options::new().deep_copy(true))?;

    assert_eq!(to.t1, at(1));
    assert_eq!(to.t2, Some(at(2)));
    assert_eq!(to.t3, at(3));
    assert_eq!(to.t4, Some(at(4)));
    assert_eq!(to.embed_t1.t5, at(5));
    assert_eq!(to.embed_t2.t6, Some(at(6)));
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Reflect)]
#[reflect(transparent)]
pub struct Str1(pub String);

#[derive(Clone, Debug, PartialEq, Reflect)]
#[reflect(transparent)]
pub struct Str2(pub String);

#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Input1 {
    pub val: Str1,
}

#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Input2 {
    pub val: Str2,
}

#[test]
fn transparent_newtypes_convert_through_their_inner_value() -> Result<(), IPanic> {
    let from = vec![Input2 {
        val: Str2("hello".into()),
    }];
    let mut to: Vec<Box<Input1>> = Vec::new();
    copy(&mut to, &from)?;

    assert_eq!(
        to,
        vec![Box::new(Input1 {
            val: Str1("hello".into())
        })]
    );
    Ok(())
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Record {
    pub name: String,
    pub age: u8,
    pub score: f32,
}

#[test]
fn string_keyed_map_into_struct() -> Result<(), IPanic> {
    use std::collections::HashMap;

    let from: HashMap<String, f64> = [
        ("Age".to_string(), 30.0),
        ("score".to_string(), 4.5),
        ("unused".to_string(), 1.0),
    ]
    .into_iter()
    .collect();

    let mut to = Record {
        name: "kept".into(),
        ..Record::default()
    };
    copy(&mut to, &from)?;

    assert_eq!(to.name, "kept");
    assert_eq!(to.age, 30);
    assert_eq!(to.score, 4.5);
    Ok(())
}
