//! End-to-end behaviour of a command session

use pixlab::node::{Category, Inputs};
use pixlab::{Color, Outcome, PixlabError, PropertyValue, Resolution, Session};

fn session(lines: &[&str]) -> Session {
    let mut session = Session::new();
    for line in lines {
        session
            .execute(line)
            .unwrap_or_else(|e| panic!("`{line}` failed: {e:?}"));
    }
    session
}

fn get(session: &Session, name: &str, property: &str) -> PropertyValue {
    session
        .registry()
        .lookup(name)
        .unwrap()
        .borrow()
        .get(property)
        .unwrap()
}

#[test]
fn noise_scale_and_blend() {
    let mut session = session(&["g = noise(512x512)", "g.scale = 2*3"]);

    let g = session.registry().lookup("g").unwrap().clone();
    assert_eq!(g.borrow().category(), Category::Generator);
    assert_eq!(g.borrow().resolution(), Some(Resolution::new(512, 512)));
    assert_eq!(g.borrow().get("scale"), Some(PropertyValue::Float(6.0)));

    assert_eq!(
        session.execute("out = g + 0.5").unwrap(),
        Outcome::Registered { name: "out".into() }
    );
    let out = session.registry().lookup("out").unwrap();
    let out = out.borrow();
    assert_eq!(out.category(), Category::MergerEffect);
    assert_eq!(out.get("mode"), Some(PropertyValue::Enum("add")));
    match out.inputs() {
        Inputs::Merger { a, b } => {
            assert!(a.ptr_eq(&g));
            let b = b.borrow();
            assert_eq!(b.kind().name(), "color");
            assert_eq!(b.get("color"), Some(PropertyValue::Color(Color::gray(0.5))));
        }
        other => panic!("unexpected inputs: {other:?}"),
    }
}

#[test]
fn listing_names() {
    let mut session = session(&["g = noise(64)"]);

    match session.execute("z.").unwrap_err() {
        PixlabError::NodeNotFound { name } => assert_eq!(name, "z"),
        other => panic!("unexpected error: {other:?}"),
    }

    let before = get(&session, "g", "scale");
    assert_eq!(
        session.execute("g.").unwrap(),
        Outcome::Listing(
            [".scale", ".seed", ".octaves", ".offset", ".colored", ".random"]
                .map(String::from)
                .to_vec()
        )
    );
    assert_eq!(get(&session, "g", "scale"), before);
}

#[test]
fn typed_parse_rules() {
    let mut session = session(&["g = noise(64)", "g.colored = YES", "g.seed = 3.9"]);
    assert_eq!(get(&session, "g", "colored"), PropertyValue::Bool(true));
    assert_eq!(get(&session, "g", "seed"), PropertyValue::Int(3));

    session.execute("g.offset = [0.5, 0.25]").unwrap();
    let before = get(&session, "g", "offset");
    let err = session.execute("g.offset = [1,2,3]").unwrap_err();
    assert!(matches!(err, PixlabError::ArityMismatch { .. }), "{err:?}");
    assert_eq!(get(&session, "g", "offset"), before);

    session.execute("c = circle(64)").unwrap();
    session.execute("c.color = [1, 0, 0, 1]").unwrap();
    assert_eq!(
        get(&session, "c", "color"),
        PropertyValue::Color(Color::rgb(1.0, 0.0, 0.0))
    );
    let err = session.execute("c.color = [0, 1, 0]").unwrap_err();
    assert!(
        matches!(err, PixlabError::ArityMismatch { expected: "[r,g,b,a]", got: 3, .. }),
        "{err:?}"
    );
    assert_eq!(
        get(&session, "c", "color"),
        PropertyValue::Color(Color::rgb(1.0, 0.0, 0.0))
    );
}

#[test]
fn enum_round_trip() {
    let mut session = session(&["g = noise(64)", "m = blend(g, 0.5)"]);
    session.execute("m.mode = .multiply").unwrap();
    assert_eq!(get(&session, "m", "mode"), PropertyValue::Enum("multiply"));

    let err = session.execute("m.mode = .blurry").unwrap_err();
    assert!(matches!(err, PixlabError::EnumValueNotFound { .. }), "{err:?}");
    assert_eq!(get(&session, "m", "mode"), PropertyValue::Enum("multiply"));

    match session.execute("m.placement = .").unwrap() {
        Outcome::Listing(cases) => {
            assert_eq!(cases, [".fill", ".aspectFit", ".aspectFill", ".center"]);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn reassignment_keeps_existing_graphs() {
    let mut session = session(&["g = noise(64)", "b = blur(g)", "g = blur(g)"]);

    let g = session.registry().lookup("g").unwrap().clone();
    let b = session.registry().lookup("b").unwrap().clone();
    assert_eq!(g.borrow().kind().name(), "blur");

    let original = match b.borrow().inputs() {
        Inputs::Single { input } => input.clone(),
        other => panic!("unexpected inputs: {other:?}"),
    };
    assert_eq!(original.borrow().kind().name(), "noise");
    match g.borrow().inputs() {
        Inputs::Single { input } => assert!(input.ptr_eq(&original)),
        other => panic!("unexpected inputs: {other:?}"),
    }

    // The two blurs share an input but not their properties
    session.execute("b.radius = 2").unwrap();
    assert_eq!(get(&session, "b", "radius"), PropertyValue::Float(2.0));
    assert_eq!(get(&session, "g", "radius"), PropertyValue::Float(0.5));
}

#[test]
fn bad_lines_do_not_end_the_session() {
    let mut session = session(&["g = noise(64)"]);
    for line in [
        "blur(",
        "nope(g)",
        "g.nothing = 1",
        "g.scale = [1, 2]",
        "x = blur(g, g)",
        "noise(12xq)",
        "[1, 2, 3, 4, 5]",
        "g.offset.x = 1",
    ] {
        assert!(session.execute(line).is_err(), "`{line}` should fail");
    }
    assert_eq!(session.registry().names(), ["g"]);
    assert!(matches!(
        session.execute("g ~ 0.5").unwrap(),
        Outcome::Render(_)
    ));
}

#[test]
fn render_outline() {
    let mut session = session(&["g = noise(hd)", "c = circle(64)"]);
    let Outcome::Render(node) = session.execute("stack(g, c) -> [1, 0, 0]").unwrap() else {
        panic!("expected a render outcome");
    };
    insta::assert_snapshot!(node.outline().trim_end(), @r"
    displace
      a: stack
        0: noise 1280x720
        1: circle 64x64
      b: color 1x1
    ");
}
