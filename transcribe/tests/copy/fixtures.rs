use std::time::SystemTime;

use transcribe::Reflect;

#[derive(Clone, Debug, Default, PartialEq, Reflect)]
#[reflect(getter(double_age: i32))]
pub struct User {
    pub name: String,
    pub birthday: Option<SystemTime>,
    #[reflect(rename = "NickName")]
    pub nickname: String,
    pub role: String,
    pub age: i32,
    pub fake_age: Option<i32>,
    pub notes: Vec<String>,
    flags: Vec<u8>,
}

impl User {
    pub fn new(name: &str, age: i32, role: &str, notes: &[&str]) -> Self {
        User {
            name: name.to_string(),
            birthday: None,
            nickname: name.to_lowercase(),
            role: role.to_string(),
            age,
            fake_age: Some(age - 6),
            notes: notes.iter().map(|n| n.to_string()).collect(),
            flags: vec![b'x'],
        }
    }

    pub fn double_age(&self) -> i32 {
        2 * self.age
    }

    pub fn flags(&self) -> &[u8] {
        &self.flags
    }
}

#[derive(Clone, Debug, Default, PartialEq, Reflect)]
#[reflect(setter(role: String))]
pub struct Employee {
    pub name: String,
    pub birthday: Option<SystemTime>,
    pub nickname: Option<String>,
    pub age: i64,
    pub fake_age: i64,
    pub employe_id: i64,
    pub double_age: i32,
    pub super_rule: String,
    pub notes: Vec<Option<Box<String>>>,
}

impl Employee {
    fn role(&mut self, role: String) {
        self.super_rule = format!("Super {role}");
    }
}

#[track_caller]
pub fn check_employee(employee: &Employee, user: &User) {
    assert_eq!(employee.name, user.name);
    assert_eq!(employee.nickname.as_deref(), Some(user.nickname.as_str()));
    assert_eq!(employee.birthday, user.birthday);
    assert_eq!(employee.age, i64::from(user.age));
    if let Some(fake_age) = user.fake_age {
        assert_eq!(employee.fake_age, i64::from(fake_age));
    }
    assert_eq!(employee.double_age, user.double_age());
    assert_eq!(employee.super_rule, format!("Super {}", user.role));

    let notes: Vec<Option<&str>> = employee
        .notes
        .iter()
        .map(|note| note.as_deref().map(String::as_str))
        .collect();
    let expected: Vec<Option<&str>> = user.notes.iter().map(|n| Some(n.as_str())).collect();
    assert_eq!(notes, expected);
}

/// An employee nothing was copied into.
#[track_caller]
pub fn check_empty_employee(employee: &Employee) {
    assert_eq!(employee, &Employee::default());
}
