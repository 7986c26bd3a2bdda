use propset::{PropertySetter, TypeDescriptor, Visibility};
use std::fmt;

#[derive(Debug, Default)]
struct Component {
    enabled: bool,
    tag:     String,
}

#[derive(Debug, Default)]
struct Control {
    component: Component,
    width:     u32,
}

#[derive(Debug, Default)]
struct Button {
    control: Control,
    caption: String,
}

#[derive(Debug)]
struct TooWide(u32);

impl fmt::Display for TooWide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "width {} exceeds the limit", self.0)
    }
}

impl std::error::Error for TooWide {}

fn component_type() -> TypeDescriptor<Component> {
    TypeDescriptor::<Component>::builder("Component")
        .field("enabled", Visibility::Protected, |c: &mut Component| &mut c.enabled)
        .method("setTag", Visibility::Public, |c: &mut Component, tag: String| {
            c.tag = format!("#{tag}");
        })
        .build()
}

fn control_type() -> TypeDescriptor<Control> {
    TypeDescriptor::<Control>::builder("Control")
        .method("setWidth", Visibility::Package, |c: &mut Control, width: u32| {
            if width > 100 {
                return Err(TooWide(width));
            }
            c.width = width;
            Ok(())
        })
        .extends(component_type(), |c: &mut Control| &mut c.component)
        .build()
}

fn button_type() -> TypeDescriptor<Button> {
    TypeDescriptor::<Button>::builder("Button")
        .extends(control_type(), |b: &mut Button| &mut b.control)
        .field("caption", Visibility::Private, |b: &mut Button| &mut b.caption)
        .build()
}

#[test]
fn descriptor_layout() {
    let button = button_type();
    assert_eq!(button.name(), "Button");
    assert_eq!(button.ancestors().to_vec(), vec!["Control".to_string(), "Component".to_string()]);
    assert_eq!(
        button.fields().iter().map(|f| f.name()).collect::<Vec<_>>(),
        vec!["caption", "enabled"],
        "own fields come before inherited ones"
    );
    assert_eq!(
        button.methods().iter().map(|m| m.name()).collect::<Vec<_>>(),
        vec!["setWidth", "setTag"]
    );
    assert_eq!(button.find_setter_method("setWidth").expect("setWidth").info().declared_in(), "Control");
    assert!(button.find_setter_method("setCaption").is_none());
}

#[test]
fn members_of_grand_ancestor() {
    let mut button = Button::default();
    let mut setter = PropertySetter::new(button_type());

    setter.set_property("enabled", true, &mut button).expect("enabled is set");
    setter.set_property("tag", "ok".to_string(), &mut button).expect("tag is set");
    setter.set_property("width", 80u32, &mut button).expect("width is set");
    setter
        .set_property("caption", "OK".to_string(), &mut button)
        .expect("caption is set");

    assert!(button.control.component.enabled);
    assert_eq!(button.control.component.tag, "#ok");
    assert_eq!(button.control.width, 80);
    assert_eq!(button.caption, "OK");
}

#[test]
fn inherited_setter_failure() {
    let mut button = Button::default();
    let mut setter = PropertySetter::from(button_type());

    let err = setter
        .set_property("width", 120u32, &mut button)
        .expect_err("too wide");
    assert_eq!(err.to_string(), "width 120 exceeds the limit");
    assert!(err.downcast_setter::<TooWide>().is_some());
    assert_eq!(button.control.width, 0);
}

#[test]
fn lifted_members_share_accessibility() {
    let component = component_type();
    let control = TypeDescriptor::<Control>::builder("Control")
        .extends(component.clone(), |c: &mut Control| &mut c.component)
        .build();

    let declared = component.find_field_including_ancestors("enabled").expect("enabled");
    let lifted = control.find_field_including_ancestors("enabled").expect("enabled");
    assert!(!lifted.info().is_accessible());

    declared.info().set_accessible(true).expect("allowed");
    assert!(lifted.info().is_accessible(), "one member, one flag");
    declared.info().set_accessible(false).expect("allowed");
    assert!(!lifted.info().is_accessible());
}

#[test]
fn separately_built_descriptors_are_independent() {
    let control = control_type();
    let button = button_type();

    let from_control = control.find_field_including_ancestors("enabled").expect("enabled");
    let from_button = button.find_field_including_ancestors("enabled").expect("enabled");

    from_control.info().set_accessible(true).expect("allowed");
    assert!(!from_button.info().is_accessible());
}
