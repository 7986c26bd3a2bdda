use propset::{PropertySetter, Reflect};

#[derive(Reflect, Default)]
struct Holder<T> {
    value: T,
    label: String,
}

#[derive(Reflect, Default)]
#[propset(extends = "holder", deny_access_override)]
struct Tagged<T: Clone> {
    holder: Holder<T>,
    #[propset(skip)]
    _tags:  Vec<T>,
}

fn main() {
    let mut tagged = Tagged::<u16>::default();
    let mut setter = PropertySetter::<Tagged<u16>>::for_type();
    // Denied overrides apply to members declared on Tagged only, Holder's fields are still writable.
    setter.set_property("value", 7u16, &mut tagged).expect("value is set");
    setter
        .set_property("label", "seven".to_string(), &mut tagged)
        .expect("label is set");
    assert_eq!(tagged.holder.value, 7);
    assert_eq!(tagged.holder.label, "seven");
}
