use transcribe::{Reflect, Typed};
use transcribe_reflect::{LogicalFields, Peek, Poke};
use transcribe_testhelpers::{IPanic, test};

#[derive(Clone, Debug, Default, Reflect)]
pub struct Audit {
    pub created_by: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Meta {
    pub version: u32,
    #[reflect(flatten)]
    pub audit: Audit,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Extra {
    pub title: String,
    pub tag: String,
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Doc {
    pub title: String,
    #[reflect(flatten)]
    meta: Option<Box<Meta>>,
    #[reflect(flatten)]
    pub extra: Option<Extra>,
    #[reflect(rename = "Body")]
    pub body: String,
    secret: u8,
}

#[test]
fn promoted_fields_follow_declared_ones() {
    let fields = LogicalFields::of(Doc::SHAPE);
    let names: Vec<&str> = fields.fields().iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        ["title", "extra", "Body", "version", "audit", "tag", "created_by", "name"]
    );

    let depths: Vec<usize> = fields.fields().iter().map(|f| f.depth()).collect();
    assert_eq!(depths, [0, 0, 0, 1, 1, 1, 2, 2]);
    assert!(fields.lookup("title").is_some_and(|f| !f.is_promoted()));
    assert!(fields.lookup("secret").is_none());
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Keys {
    #[reflect(rename = "ID")]
    pub external: u64,
    pub id: u64,
}

#[test]
fn lookup_prefers_exact_names() {
    let fields = LogicalFields::of(Doc::SHAPE);
    assert_eq!(fields.lookup("Body").map(|f| f.field.name), Some("body"));
    assert_eq!(fields.lookup("BODY").map(|f| f.field.name), Some("body"));
    assert!(fields.lookup("created_BY").is_some());

    let keys = LogicalFields::of(Keys::SHAPE);
    assert_eq!(keys.lookup("id").map(|f| f.field.name), Some("id"));
    assert_eq!(keys.lookup("ID").map(|f| f.field.name), Some("external"));
    assert_eq!(keys.lookup("Id").map(|f| f.field.name), Some("external"));
}

#[test]
fn absent_members_hide_their_fields() {
    let doc = Doc {
        title: "doc".into(),
        ..Doc::default()
    };
    let fields = LogicalFields::of(Doc::SHAPE);
    let root = Peek::new(&doc);

    let title = fields.lookup("title").and_then(|f| f.resolve(root));
    assert_eq!(title.map(|p| p.get::<String>().ok().cloned()), Some(Some("doc".into())));
    assert!(fields.lookup("version").and_then(|f| f.resolve(root)).is_none());
    assert!(fields.lookup("tag").and_then(|f| f.resolve(root)).is_none());
}

#[test]
fn writing_allocates_exported_members_only() -> Result<(), IPanic> {
    let mut doc = Doc::default();
    let fields = LogicalFields::of(Doc::SHAPE);

    let version = fields.lookup("version").expect("promoted from meta");
    assert!(version.resolve_mut(Poke::new(&mut doc), true).is_none());
    assert!(doc.meta.is_none());

    let tag = fields.lookup("tag").expect("promoted from extra");
    assert!(tag.resolve_mut(Poke::new(&mut doc), false).is_none());
    if let Some(mut slot) = tag.resolve_mut(Poke::new(&mut doc), true) {
        slot.set(String::from("rust"))?;
    }
    assert_eq!(doc.extra.as_ref().map(|e| e.tag.as_str()), Some("rust"));

    doc.meta = Some(Box::default());
    let name = fields.lookup("name").expect("promoted from audit");
    if let Some(mut slot) = name.resolve_mut(Poke::new(&mut doc), false) {
        slot.set(String::from("ada"))?;
    }
    assert_eq!(doc.meta.map(|m| m.audit.name), Some("ada".to_string()));
    assert_eq!(doc.secret, 0);
    Ok(())
}

#[derive(Clone, Debug, Default, Reflect)]
pub struct Node {
    pub value: i32,
    #[reflect(flatten)]
    pub next: Option<Box<Node>>,
}

#[test]
fn self_flattening_stops_at_the_first_level() {
    let fields = LogicalFields::of(Node::SHAPE);
    let names: Vec<&str> = fields.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["value", "next"]);
}

#[test]
fn non_structs_have_no_fields() {
    assert!(LogicalFields::of(<Vec<Doc> as Typed>::SHAPE).fields().is_empty());
    assert!(LogicalFields::of(String::SHAPE).getters().is_empty());
}
