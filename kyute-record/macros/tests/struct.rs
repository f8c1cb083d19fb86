use kyute_record::{FieldKey, Lens, LensExt};

#[derive(Clone, Lens)]
struct Fields {
    a: i32,
    b: u64,
    c: String,
}

#[derive(Clone, Lens)]
struct Tuple(i32, u64, String);

#[derive(Clone, Lens)]
struct Attributes {
    #[lens(name = "renamed")]
    original: u8,
    #[lens(ignore)]
    #[allow(dead_code)]
    skipped: u8,
    r#type: u8,
}

#[test]
fn struct_check() {
    let mut fields = Fields {
        a: 1,
        b: 2,
        c: "third".to_string(),
    };

    let mut tup = Tuple(4, 5, "sixth".to_string());

    assert_eq!(Fields::a.get(&fields), Some(1));
    assert_eq!(Fields::b.get(&fields), Some(2));
    assert_eq!(Fields::c.get(&fields).as_deref(), Some("third"));

    assert_eq!(Tuple::elem_0.get(&tup), Some(4));
    assert_eq!(Tuple::elem_1.get(&tup), Some(5));
    assert_eq!(Tuple::elem_2.get(&tup).as_deref(), Some("sixth"));

    assert!(Fields::c.put(&mut fields, "seventh".to_string()));
    assert!(Tuple::elem_2.put(&mut tup, "eighth".to_string()));

    assert_eq!(fields.c, "seventh");
    assert_eq!(tup.2, "eighth");
}

#[test]
fn keys() {
    assert_eq!(Fields::a.key(), FieldKey::new::<Fields>("a"));
    assert_ne!(Fields::a.key(), Fields::b.key());
    assert_eq!(Tuple::elem_1.key().name(), "1");
    assert_eq!(Tuple::elem_1.path().to_string(), "1");

    // renaming the constant does not change the identity of the field
    assert_eq!(Attributes::renamed.key(), FieldKey::new::<Attributes>("original"));
    assert_eq!(Attributes::r#type.key().name(), "type");
}

#[test]
fn lenses_are_constants() {
    const A: kyute_record::FieldLens<Fields, i32> = Fields::a;
    let fields = Fields {
        a: 10,
        b: 0,
        c: String::new(),
    };
    assert_eq!(A.try_with(&fields, |a| a * 2), Some(20));
    assert_eq!(A.path(), Fields::a.path());
}
