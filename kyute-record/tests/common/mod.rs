#![allow(dead_code)]

use kyute_record::Lens;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Lens)]
pub struct Child {
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Lens)]
pub struct Inner {
    pub a: i32,
    pub z: Child,
    pub extra: Option<Child>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Lens)]
pub struct Root {
    pub v: Inner,
    pub w: Inner,
    pub count: u32,
}

impl Default for Inner {
    fn default() -> Self {
        Inner {
            a: 8,
            z: Child::default(),
            extra: None,
        }
    }
}

impl Default for Root {
    fn default() -> Self {
        Root {
            v: Inner::default(),
            w: Inner::default(),
            count: 0,
        }
    }
}
