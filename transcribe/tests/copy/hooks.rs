use std::time::{Duration, SystemTime};

use transcribe::{
    CopyValuer, Dynamic, ErrorKind, HookError, Nullable, Reflect, Scanner, Valuer, copy,
};
use transcribe_testhelpers::{IPanic, test};

#[derive(Clone, Debug, Default, PartialEq, Reflect)]
#[reflect(scanner)]
pub struct ScannerString(pub String);

impl Scanner for ScannerString {
    fn scan(&mut self, src: &dyn Reflect) -> Result<(), HookError> {
        let text = src
            .downcast_ref::<String>()
            .ok_or_else(|| format!("cannot scan a {}", src.shape()))?;
        self.0 = format!("scanned: {text}");
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Reflect)]
#[reflect(valuer)]
pub struct ValuerStruct {
    pub a: String,
    pub b: i32,
}

impl Valuer for ValuerStruct {
    fn value(&self) -> Result<Option<Box<dyn Reflect>>, HookError> {
        if self.b < 0 {
            return Err("negative b".into());
        }
        if self.a.is_empty() {
            return Ok(None);
        }
        Ok(Some(Box::new(format!(
            r#"{{"A":"{}","B":{}}}"#,
            self.a, self.b
        ))))
    }
}

#[test]
fn scanner_is_skipped_between_identical_types() -> Result<(), IPanic> {
    let from = ScannerString("plain".into());
    let mut to = ScannerString::default();
    copy(&mut to, &from)?;

    assert_eq!(to, from);
    Ok(())
}

#[test]
fn valuer_feeds_scanner() -> Result<(), IPanic> {
    let from = ValuerStruct {
        a: "a".into(),
        b: 123,
    };

    let mut scanned = ScannerString::default();
    copy(&mut scanned, &from)?;
    assert_eq!(scanned.0, r#"scanned: {"A":"a","B":123}"#);

    let mut plain = String::new();
    copy(&mut plain, &from)?;
    assert_eq!(plain, r#"{"A":"a","B":123}"#);

    let mut wrapped: Option<Box<ScannerString>> = None;
    copy(&mut wrapped, &from)?;
    assert_eq!(
        wrapped.map(|s| s.0),
        Some(r#"scanned: {"A":"a","B":123}"#.to_string())
    );
    Ok(())
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct WithValuer {
    pub payload: ValuerStruct,
    pub label: ValuerStruct,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct WithScanner {
    pub payload: ScannerString,
    pub label: Option<String>,
}

#[test]
fn valuer_without_value_resets_destination() -> Result<(), IPanic> {
    let from = WithValuer {
        payload: ValuerStruct {
            a: "x".into(),
            b: 1,
        },
        label: ValuerStruct::default(),
    };
    let mut to = WithScanner {
        payload: ScannerString::default(),
        label: Some("stale".into()),
    };
    copy(&mut to, &from)?;

    assert_eq!(to.payload.0, r#"scanned: {"A":"x","B":1}"#);
    assert_eq!(to.label, None);

    let mut plain = String::from("stale");
    copy(&mut plain, &ValuerStruct::default())?;
    assert_eq!(plain, "");
    Ok(())
}

#[test]
fn hook_errors_abort_the_copy() {
    let broken = ValuerStruct {
        a: "a".into(),
        b: -1,
    };
    let err = copy(&mut String::new(), &broken).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueAccessFailed);
    assert_eq!(err.cause().map(|c| c.to_string()), Some("negative b".into()));

    let err = copy(&mut ScannerString::default(), &42i32).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScanFailed);
}

#[derive(Clone, Debug, Reflect)]
pub struct NullableRow {
    pub name: Nullable<String>,
    pub age: Nullable<i64>,
    pub score: Nullable<i32>,
    pub seen: Nullable<SystemTime>,
}

#[derive(Clone, Debug, Reflect)]
pub struct PlainRow {
    pub name: String,
    pub age: i32,
    pub score: i64,
    pub seen: Option<SystemTime>,
}

#[test]
fn nullable_fields_into_plain_fields() -> Result<(), IPanic> {
    let at = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
    let from = NullableRow {
        name: Nullable::new("Jinzhu".into()),
        age: Nullable::new(18),
        score: Nullable::null(),
        seen: Nullable::new(at),
    };
    let mut to = PlainRow {
        name: String::new(),
        age: 0,
        score: 99,
        seen: None,
    };
    copy(&mut to, &from)?;

    assert_eq!(to.name, "Jinzhu");
    assert_eq!(to.age, 18);
    assert_eq!(to.score, 0);
    assert_eq!(to.seen, Some(at));

    let from = NullableRow {
        seen: Nullable::null(),
        ..from
    };
    copy(&mut to, &from)?;
    assert_eq!(to.seen, None);
    Ok(())
}

#[test]
fn plain_fields_into_nullable_fields() -> Result<(), IPanic> {
    let at = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
    let from = PlainRow {
        name: "Jinzhu".into(),
        age: 0,
        score: 7,
        seen: None,
    };
    let mut to = NullableRow {
        name: Nullable::null(),
        age: Nullable::new(5),
        score: Nullable::null(),
        seen: Nullable::new(at),
    };
    copy(&mut to, &from)?;

    assert_eq!(to.name, Nullable::new("Jinzhu".to_string()));
    assert_eq!(to.age, Nullable::null());
    assert_eq!(to.score, Nullable::new(7));
    assert!(!to.seen.valid);
    assert_eq!(to.seen.value, SystemTime::UNIX_EPOCH);
    Ok(())
}

#[test]
fn invalid_nullable_resets_plain_destination() -> Result<(), IPanic> {
    let mut time = SystemTime::now();
    copy(&mut time, &Nullable::<SystemTime>::null())?;
    assert_eq!(time, SystemTime::UNIX_EPOCH);

    let mut optional = Some(SystemTime::now());
    copy(&mut optional, &Nullable::<SystemTime>::null())?;
    assert_eq!(optional, None);

    let mut boxed: Option<Box<String>> = Some(Box::new("kept".into()));
    copy(&mut boxed, &None::<String>)?;
    assert_eq!(boxed, None);

    let mut text = String::from("kept");
    copy(&mut text, &None::<String>)?;
    assert_eq!(text, "kept");
    Ok(())
}

#[derive(Clone, Debug, Reflect)]
#[reflect(copy_valuer)]
pub struct TestValuer {
    pub value: Dynamic,
}

impl CopyValuer for TestValuer {
    fn copy_value(&self) -> Option<Box<dyn Reflect>> {
        self.value.get().map(|v| v.clone_boxed())
    }
}

#[derive(Clone, Debug, Reflect)]
pub struct ValuerHolder {
    pub field: TestValuer,
}

#[derive(Clone, Debug, Reflect)]
pub struct StringHolder {
    pub field: String,
}

#[test]
fn copy_valuer_stands_in_for_its_payload() -> Result<(), IPanic> {
    let from = ValuerHolder {
        field: TestValuer {
            value: Dynamic::new("hello".to_string()),
        },
    };
    let mut to = StringHolder {
        field: String::new(),
    };
    copy(&mut to, &from)?;
    assert_eq!(to.field, "hello");

    let mut top = String::new();
    copy(&mut top, &from.field)?;
    assert_eq!(top, "hello");

    let mut untouched = String::from("kept");
    copy(
        &mut untouched,
        &TestValuer {
            value: Dynamic::none(),
        },
    )?;
    assert_eq!(untouched, "kept");
    Ok(())
}

#[derive(Clone, Debug, Reflect)]
pub struct NarrowCounts {
    pub hits: Nullable<i32>,
    pub misses: Nullable<i32>,
    pub spare: Option<i32>,
}

#[derive(Clone, Debug, Reflect)]
pub struct WideCounts {
    pub hits: Nullable<i64>,
    pub misses: Nullable<i64>,
    pub spare: Nullable<i64>,
}

#[test]
fn valid_zero_survives_between_nullable_types() -> Result<(), IPanic> {
    let mut wide = Nullable::<i64>::null();
    copy(&mut wide, &Nullable::new(0i32))?;
    assert_eq!(wide, Nullable::new(0));

    let mut narrow = Nullable::<i32>::null();
    copy(&mut narrow, &wide)?;
    assert_eq!(narrow.as_option(), Some(&0));

    copy(&mut wide, &Nullable::<i32>::null())?;
    assert_eq!(wide.as_option(), None);

    let from = NarrowCounts {
        hits: Nullable::new(0),
        misses: Nullable::null(),
        spare: Some(0),
    };
    let mut to = WideCounts {
        hits: Nullable::null(),
        misses: Nullable::new(3),
        spare: Nullable::null(),
    };
    copy(&mut to, &from)?;
    assert_eq!(to.hits.as_option(), Some(&0));
    assert_eq!(to.misses, Nullable::null());
    assert_eq!(to.spare.as_option(), Some(&0));
    Ok(())
}
