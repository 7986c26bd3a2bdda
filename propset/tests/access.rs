use propset::{PropertyError, PropertySetter, Reflect, TypeDescriptor, Visibility};
use std::panic::{self, AssertUnwindSafe};

#[derive(Reflect, Debug, Default)]
#[propset(method(call = "set_secret", vis = "private"))]
struct Widget {
    name:       String,
    pub public: u8,
    #[propset(skip)]
    secret:     String,
}

impl Widget {
    fn set_secret(&mut self, secret: String) {
        self.secret = secret;
    }
}

#[derive(Debug, thiserror::Error)]
#[error("locked")]
struct Locked;

#[derive(Reflect, Debug, Default)]
#[propset(
    method(call = "set_level", vis = "private"),
    method(call = "set_mode", vis = "private")
)]
struct Gauge {
    level: u8,
    mode:  String,
}

impl Gauge {
    fn set_level(&mut self, _level: u8) -> Result<(), Locked> {
        Err(Locked)
    }

    fn set_mode(&mut self, mode: String) {
        panic!("unsupported mode {mode}");
    }
}

#[derive(Debug, Default)]
struct Vault {
    code: u32,
    pub owner: String,
}

fn vault_descriptor() -> TypeDescriptor<Vault> {
    TypeDescriptor::<Vault>::builder("Vault")
        .deny_access_override()
        .field("code", Visibility::Private, |v: &mut Vault| &mut v.code)
        .field("owner", Visibility::Public, |v: &mut Vault| &mut v.owner)
        .build()
}

#[test]
fn private_field_stays_inaccessible() {
    let mut widget = Widget::default();
    let mut setter = PropertySetter::<Widget>::for_type();

    let field = setter
        .target_type()
        .find_field_including_ancestors("name")
        .expect("name field")
        .clone();
    assert!(!field.info().is_accessible(), "private field starts inaccessible");

    setter
        .set_property("name", "foo".to_string(), &mut widget)
        .expect("first write");
    assert!(!field.info().is_accessible(), "accessibility is restored after the write");

    setter
        .set_property("name", "bar".to_string(), &mut widget)
        .expect("second write");
    assert!(!field.info().is_accessible());
    assert_eq!(widget.name, "bar");
}

#[test]
fn restored_after_failure() {
    let mut widget = Widget::default();
    let mut setter = PropertySetter::<Widget>::for_type();

    setter
        .set_property("name", 1u8, &mut widget)
        .expect_err("u8 is not a String");
    let name = setter.cached_mutator("name").expect("name is cached").member();
    assert!(!name.is_accessible(), "restored on the error path too");
}

#[test]
fn restored_after_setter_error() {
    let mut gauge = Gauge::default();
    let mut setter = PropertySetter::<Gauge>::for_type();

    let err = setter
        .set_property("level", 5u8, &mut gauge)
        .expect_err("the gauge is locked");
    assert_eq!(err.to_string(), "locked");

    let method = setter.cached_mutator("level").expect("level is cached");
    assert!(method.is_method());
    assert!(!method.member().is_accessible(), "private method is inaccessible again");
    assert_eq!(gauge.level, 0);
}

#[test]
fn restored_after_setter_panic() {
    let mut gauge = Gauge::default();
    let mut setter = PropertySetter::<Gauge>::for_type();
    let method = setter
        .target_type()
        .find_setter_method("setMode")
        .expect("setMode method")
        .clone();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        setter.set_property("mode", "turbo".to_string(), &mut gauge)
    }));
    assert!(outcome.is_err(), "the panic reaches the caller");
    assert!(!method.info().is_accessible(), "restored while unwinding");

    assert!(
        !setter.cached_mutator("mode").expect("mode is cached").member().is_accessible(),
        "the cached member shares the flag"
    );
}

#[test]
fn accessible_flag_is_preserved() {
    let mut widget = Widget::default();
    let mut setter = PropertySetter::<Widget>::for_type();

    let method = setter
        .target_type()
        .find_setter_method("setSecret")
        .expect("setSecret method")
        .clone();
    method.info().set_accessible(true).expect("override is allowed");

    setter
        .set_property("secret", "s3cr3t".to_string(), &mut widget)
        .expect("secret is set");
    assert_eq!(widget.secret, "s3cr3t");
    assert!(method.info().is_accessible(), "a previously accessible member stays so");
}

#[test]
fn direct_invocation_respects_access() {
    let mut widget = Widget::default();
    let descriptor = Widget::type_descriptor();

    let method = descriptor.find_setter_method("setSecret").expect("setSecret method");
    let err = method
        .invoke(&mut widget, Box::new("x".to_string()))
        .expect_err("private method without override");
    assert!(matches!(err, PropertyError::IllegalAccess { visibility: Visibility::Private, .. }));

    let public = descriptor.find_field_including_ancestors("public").expect("public field");
    assert!(public.info().is_accessible());
    public.set(&mut widget, Box::new(3u8)).expect("public field is writable");
    assert_eq!(widget.public, 3);
}

#[test]
fn denied_override() {
    let mut vault = Vault::default();
    let mut setter = PropertySetter::new(vault_descriptor());

    let err = setter
        .set_property("code", 1234u32, &mut vault)
        .expect_err("the vault denies access overrides");
    match err {
        PropertyError::IllegalAccess {
            ref member,
            ref declared_in,
            visibility,
        } => {
            assert_eq!(member, "code");
            assert_eq!(declared_in, "Vault");
            assert_eq!(visibility, Visibility::Private);
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "Can not access private member Vault.code");
    assert_eq!(vault.code, 0);
    assert!(!setter.cached_mutator("code").expect("cached").member().is_accessible());

    setter
        .set_property("owner", "alice".to_string(), &mut vault)
        .expect("public members need no override");
    assert_eq!(vault.owner, "alice");
}
