use std::rc::Rc;

use transcribe::{Dynamic, Nullable, Reflect, ScalarValue, Typed};
use transcribe_reflect::{Peek, ReflectError};
use transcribe_testhelpers::{IPanic, test};

#[derive(Clone, Debug, Reflect)]
#[reflect(getter(area: u32))]
pub struct Rect {
    pub width: u32,
    pub height: u32,
    hidden: bool,
}

impl Rect {
    fn area(&self) -> u32 {
        self.width * self.height
    }
}

#[derive(Clone, Debug, Reflect)]
#[reflect(transparent)]
pub struct Meters(pub f64);

#[test]
fn get_checks_the_concrete_type() {
    let value = 42u8;
    let peek = Peek::new(&value);
    assert_eq!(peek.get::<u8>().ok(), Some(&42));

    let err = peek.get::<String>().unwrap_err();
    insta::assert_snapshot!(err, @"Was not a alloc::string::String: u8");
}

#[test]
fn scalars_widen() -> Result<(), IPanic> {
    assert_eq!(Peek::new(&-5i16).scalar()?, ScalarValue::I64(-5));
    assert_eq!(Peek::new(&7u32).scalar()?, ScalarValue::U64(7));
    assert_eq!(Peek::new(&1.5f32).scalar()?, ScalarValue::F64(1.5));
    assert_eq!(
        Peek::new(&String::from("hi")).scalar()?,
        ScalarValue::Str("hi".into())
    );
    assert!(matches!(
        Peek::new(&vec![1u8]).scalar(),
        Err(ReflectError::WasNotA { .. })
    ));
    Ok(())
}

#[test]
fn struct_fields_and_getters() -> Result<(), IPanic> {
    let rect = Rect {
        width: 3,
        height: 4,
        hidden: true,
    };
    let peek = Peek::new(&rect).into_struct()?;

    assert_eq!(peek.field_count(), 3);
    assert_eq!(peek.field(1)?.get::<u32>()?, &4);
    assert!(peek.field(3).is_err());

    let names: Vec<&str> = peek.fields().map(|(field, _)| field.name()).collect();
    assert_eq!(names, ["width", "height", "hidden"]);

    let exported: Vec<bool> = peek.fields().map(|(field, _)| field.is_exported()).collect();
    assert_eq!(exported, [true, true, false]);
    assert_eq!(
        peek.field_by_name("hidden").map(|p| p.get::<bool>().ok().copied()),
        Some(Some(true))
    );

    let area = peek.call_getter("area").expect("area getter");
    assert_eq!(area.downcast_ref::<u32>(), Some(&12));
    assert!(peek.call_getter("perimeter").is_none());
    Ok(())
}

#[test]
fn wrappers_lead_to_their_payload() -> Result<(), IPanic> {
    let some = Some(3i32);
    assert_eq!(Peek::new(&some).into_option()?.map(|p| p.shape()), Some(i32::SHAPE));
    assert!(Peek::new(&None::<i32>).into_option()?.is_none());

    let shared = Rc::new(String::from("rc"));
    let pointee = Peek::new(&shared).into_pointer()?;
    assert_eq!(pointee.get::<String>()?, "rc");
    assert!(Peek::new(&shared).as_pointer().is_some());

    let dynamic = Dynamic::new(9u64);
    let held = Peek::new(&dynamic).into_dynamic()?.expect("a value");
    assert_eq!(held.get::<u64>()?, &9);

    let invalid = Nullable::<i32>::null();
    assert!(Peek::new(&invalid).into_nullable()?.is_none());
    let valid = Nullable::new(2i32);
    assert!(Peek::new(&valid).into_nullable()?.is_some());

    let meters = Meters(1.25);
    assert_eq!(Peek::new(&meters).into_transparent()?.get::<f64>()?, &1.25);
    assert!(Peek::new(&1.25f64).into_transparent().is_err());
    Ok(())
}

#[test]
fn zero_detection() {
    assert!(Peek::new(&Rect {
        width: 0,
        height: 0,
        hidden: false,
    })
    .is_zero());
    assert!(!Peek::new(&Meters(0.5)).is_zero());
    assert!(Peek::new(&Vec::<String>::new()).is_zero());
}
