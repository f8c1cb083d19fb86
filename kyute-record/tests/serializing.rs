#![cfg(feature = "serializing")]
mod common;

use common::{Child, Inner, Root};
use kyute_record::{Lens, Mutations, Predicates, Technique};
use serde_json::json;

#[test]
fn field_key_serializes_as_its_name() {
    assert_eq!(serde_json::to_value(Inner::a.key()).unwrap(), json!("a"));
}

#[test]
fn field_path_serializes_as_names() {
    let mutation = Mutations::<Root>::build(|rec| {
        rec.field(Root::v).field_opt(Inner::extra).field(Child::name).set("x".to_string());
    })
    .into_changes()
    .remove(0);

    assert_eq!(
        serde_json::to_value(mutation.path()).unwrap(),
        json!(["v", "extra", "?", "name"])
    );
    assert_eq!(serde_json::to_string(&Root::count.path()).unwrap(), r#"["count"]"#);
}

#[test]
fn technique_serializes_as_variant_name() {
    let predicate = Predicates::<Root>::build(|rec| {
        rec.field(Root::w).field(Inner::a).is_greater(1);
    })
    .into_changes()
    .remove(0);

    assert_eq!(serde_json::to_value(predicate.technique()).unwrap(), json!("GreaterThan"));
    assert_eq!(serde_json::to_value(Technique::Equal).unwrap(), json!("Equal"));
}
