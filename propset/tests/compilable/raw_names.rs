use propset::{PropertySetter, Reflect};

#[derive(Reflect, Default)]
#[propset(method(call = "set_match_all", name = "setMatchAll"))]
pub struct Filter {
    pub r#type: String,
    match_all:  bool,
}

impl Filter {
    pub fn set_match_all(&mut self, match_all: bool) -> Result<(), std::io::Error> {
        self.match_all = match_all;
        Ok(())
    }
}

fn main() {
    let mut filter = Filter::default();
    let mut setter = PropertySetter::<Filter>::for_type();
    setter.set_property("type", "glob".to_string(), &mut filter).expect("type is set");
    setter.set_property("matchAll", true, &mut filter).expect("matchAll is set");
    assert_eq!(filter.r#type, "glob");
    assert!(filter.match_all);
}
