//! Dotted-path property assignment: `name.property = value`
//!
//! Every check runs before the node is touched, so a failed assignment
//! leaves the node exactly as it was.

use crate::errors::{PixlabError, Result};
use crate::eval::{evaluate_number, evaluate_numbers};
use crate::log::debug;
use crate::node::{PropertyDescriptor, PropertyKind, PropertyValue};
use crate::registry::Registry;
use crate::types::{Color, Point, Rect, Size};

/// Result of a recognised dotted assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Assigned {
    /// The property now holds `value`
    Set {
        name: String,
        property: String,
        value: PropertyValue,
    },
    /// `name.enum = .` asked for the enum's cases; nothing changed
    Cases(Vec<String>),
}

/// Assign `value` to the property named by `path`.
///
/// Returns `Ok(None)` when `path` has no dot, leaving the command to be
/// treated as a whole-name assignment.
pub fn assign(registry: &Registry, path: &str, value: &str) -> Result<Option<Assigned>> {
    let Some((name, property)) = split_path(path)? else {
        return Ok(None);
    };

    let node = registry.lookup(name)?.clone();
    let descriptor = {
        let node = node.borrow();
        let properties = node.properties();
        properties.descriptor(property).ok_or_else(|| {
            PixlabError::property_not_found(name, property, properties.names())
        })?
    };

    let parsed = match parse_value(descriptor, value)? {
        Parsed::Value(parsed) => parsed,
        Parsed::Cases(cases) => return Ok(Some(Assigned::Cases(cases))),
    };

    node.borrow_mut().properties_mut().set(property, parsed)?;
    debug!(%name, %property, value = %parsed, "property set");
    Ok(Some(Assigned::Set {
        name: name.to_string(),
        property: property.to_string(),
        value: parsed,
    }))
}

/// The settable properties of the node called `name`, each written `.property`
pub fn list_properties(registry: &Registry, name: &str) -> Result<Vec<String>> {
    let node = registry.lookup(name)?;
    let node = node.borrow();
    Ok(node
        .properties()
        .names()
        .into_iter()
        .map(|property| format!(".{property}"))
        .collect())
}

fn split_path(path: &str) -> Result<Option<(&str, &str)>> {
    let Some((name, property)) = path.split_once('.') else {
        return Ok(None);
    };
    let (name, property) = (name.trim(), property.trim());
    if property.contains('.') {
        return Err(PixlabError::NestedPath {
            path: path.to_string(),
        });
    }
    if name.is_empty() {
        return Err(PixlabError::EmptyName);
    }
    Ok(Some((name, property)))
}

enum Parsed {
    Value(PropertyValue),
    Cases(Vec<String>),
}

fn parse_value(descriptor: &PropertyDescriptor, text: &str) -> Result<Parsed> {
    let text = text.trim();
    let property = descriptor.name;
    let value = match descriptor.kind {
        PropertyKind::Float => PropertyValue::Float(evaluate_number(text)?),
        PropertyKind::Int => PropertyValue::Int(evaluate_number(text)?.trunc() as i64),
        PropertyKind::Bool => PropertyValue::Bool(parse_bool(text)?),
        PropertyKind::Point => {
            let [x, y] = shaped(property, "[x,y]", text)?;
            PropertyValue::Point(Point::new(x, y))
        }
        PropertyKind::Size => {
            let [w, h] = shaped(property, "[w,h]", text)?;
            PropertyValue::Size(Size::new(w, h))
        }
        PropertyKind::Rect => {
            let [x, y, w, h] = shaped(property, "[x,y,w,h]", text)?;
            PropertyValue::Rect(Rect::new(x, y, w, h))
        }
        PropertyKind::Color => {
            let [r, g, b, a] = shaped(property, "[r,g,b,a]", text)?;
            PropertyValue::Color(Color::rgba(r, g, b, a))
        }
        PropertyKind::Enum(cases) => {
            let Some(case) = text.strip_prefix('.') else {
                return Err(PixlabError::EnumSyntax {
                    property: property.to_string(),
                    example: cases.first().copied().unwrap_or_default(),
                });
            };
            if case.is_empty() {
                let listing = cases.iter().map(|c| format!(".{c}")).collect();
                return Ok(Parsed::Cases(listing));
            }
            let case = cases
                .iter()
                .copied()
                .find(|c| *c == case)
                .ok_or_else(|| PixlabError::enum_value_not_found(case, cases))?;
            PropertyValue::Enum(case)
        }
    };
    Ok(Parsed::Value(value))
}

fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "true" | "True" | "YES" => Ok(true),
        "false" | "False" | "NO" => Ok(false),
        _ => Ok(evaluate_number(text)? > 0.0),
    }
}

/// Evaluate an array of exactly `N` numbers
fn shaped<const N: usize>(property: &str, expected: &'static str, text: &str) -> Result<[f64; N]> {
    let items = evaluate_numbers(text)?;
    let got = items.len();
    items.try_into().map_err(|_| PixlabError::ArityMismatch {
        property: property.to_string(),
        expected,
        got,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{GeneratorKind, MultiEffectKind, Node, NodeRef, SingleEffectKind};
    use crate::types::Resolution;

    fn registry() -> (Registry, NodeRef) {
        let mut registry = Registry::new();
        let g: NodeRef = Node::generator(GeneratorKind::Noise, Resolution::square(8)).into();
        registry.insert("g", g.clone());
        let b: NodeRef = Node::single(SingleEffectKind::Blur, g.clone()).into();
        registry.insert("b", b);
        (registry, g)
    }

    fn set(registry: &Registry, path: &str, value: &str) -> Result<Option<Assigned>> {
        assign(registry, path, value)
    }

    fn get(registry: &Registry, name: &str, property: &str) -> PropertyValue {
        registry.lookup(name).unwrap().borrow().get(property).unwrap()
    }

    #[test]
    fn undotted_paths_fall_through() {
        let (registry, _) = registry();
        assert_eq!(set(&registry, "g", "3").unwrap(), None);
    }

    #[test]
    fn float_from_expression() {
        let (registry, g) = registry();
        set(&registry, "g.scale", "2*3").unwrap();
        assert_eq!(g.borrow().get("scale"), Some(PropertyValue::Float(6.0)));
    }

    #[test]
    fn int_truncates_toward_zero() {
        let (registry, _) = registry();
        set(&registry, "g.seed", "3.9").unwrap();
        assert_eq!(get(&registry, "g", "seed"), PropertyValue::Int(3));
        set(&registry, "g.seed", "-3.9").unwrap();
        assert_eq!(get(&registry, "g", "seed"), PropertyValue::Int(-3));
    }

    #[test]
    fn bool_tokens_and_numbers() {
        let (registry, _) = registry();
        for (text, expected) in [
            ("YES", true),
            ("False", false),
            ("true", true),
            ("NO", false),
            ("0.5", true),
            ("1 - 1", false),
        ] {
            set(&registry, "g.colored", text).unwrap();
            assert_eq!(get(&registry, "g", "colored"), PropertyValue::Bool(expected), "{text}");
        }
    }

    #[test]
    fn shaped_values() {
        let (registry, _) = registry();
        set(&registry, "g.offset", "[0.25, -1]").unwrap();
        assert_eq!(
            get(&registry, "g", "offset"),
            PropertyValue::Point(Point::new(0.25, -1.0))
        );

        let mut registry = registry;
        let crop: NodeRef = Node::single(
            SingleEffectKind::Crop,
            registry.lookup("g").unwrap().clone(),
        )
        .into();
        registry.insert("c", crop);
        set(&registry, "c.crop", "[0, 0, 0.5, 0.5]").unwrap();
        assert_eq!(
            get(&registry, "c", "crop"),
            PropertyValue::Rect(Rect::new(0.0, 0.0, 0.5, 0.5))
        );
    }

    #[test]
    fn arity_violation_leaves_value_unchanged() {
        let (mut registry, g) = registry();
        let u: NodeRef = Node::generator(GeneratorKind::Rectangle, Resolution::square(8)).into();
        let c: NodeRef = Node::single(SingleEffectKind::Crop, g.clone()).into();
        let t: NodeRef = Node::single(SingleEffectKind::Tint, g).into();
        registry.insert("u", u);
        registry.insert("c", c);
        registry.insert("t", t);

        for (path, text, shape, count) in [
            ("g.offset", "[1,2,3]", "[x,y]", 3),
            ("u.size", "[1,2,3]", "[w,h]", 3),
            ("c.crop", "[0,0,1]", "[x,y,w,h]", 3),
            // Three channels coerce to a color elsewhere, but not here
            ("t.color", "[1,0,0]", "[r,g,b,a]", 3),
            ("t.color", "0.5", "[r,g,b,a]", 1),
        ] {
            let (name, property) = path.split_once('.').unwrap();
            let before = get(&registry, name, property);
            match set(&registry, path, text).unwrap_err() {
                PixlabError::ArityMismatch { expected, got, .. } => {
                    assert_eq!(expected, shape, "{path}");
                    assert_eq!(got, count, "{path}");
                }
                other => panic!("{path}: unexpected error: {other:?}"),
            }
            assert_eq!(get(&registry, name, property), before, "{path}");
        }
    }

    #[test]
    fn color_round_trip() {
        let (mut registry, g) = registry();
        let t: NodeRef = Node::single(SingleEffectKind::Tint, g).into();
        registry.insert("t", t);
        set(&registry, "t.color", "[1, 0.5, 0, 0.25]").unwrap();
        assert_eq!(
            get(&registry, "t", "color"),
            PropertyValue::Color(Color::rgba(1.0, 0.5, 0.0, 0.25))
        );
    }

    #[test]
    fn enum_round_trip() {
        let (registry, _) = registry();
        set(&registry, "b.style", ".zoom").unwrap();
        assert_eq!(get(&registry, "b", "style"), PropertyValue::Enum("zoom"));

        match set(&registry, "b.style", ".blurry").unwrap_err() {
            PixlabError::EnumValueNotFound { value, cases, .. } => {
                assert_eq!(value, "blurry");
                assert!(cases.contains(&"zoom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(get(&registry, "b", "style"), PropertyValue::Enum("zoom"));
    }

    #[test]
    fn bare_dot_lists_enum_cases() {
        let (mut registry, g) = registry();
        let stack: NodeRef = Node::multi(MultiEffectKind::Stack, vec![g]).unwrap().into();
        registry.insert("s", stack);
        let listed = set(&registry, "s.axis", ".").unwrap();
        assert_eq!(
            listed,
            Some(Assigned::Cases(vec![".horizontal".into(), ".vertical".into()]))
        );
        assert_eq!(get(&registry, "s", "axis"), PropertyValue::Enum("vertical"));
    }

    #[test]
    fn enum_values_need_a_dot() {
        let (registry, _) = registry();
        let err = set(&registry, "b.style", "zoom").unwrap_err();
        assert!(matches!(err, PixlabError::EnumSyntax { .. }), "{err:?}");
    }

    #[test]
    fn missing_node_and_property() {
        let (registry, _) = registry();
        assert!(matches!(
            set(&registry, "z.scale", "1").unwrap_err(),
            PixlabError::NodeNotFound { ref name } if name == "z"
        ));
        match set(&registry, "g.size", "1").unwrap_err() {
            PixlabError::PropertyNotFound { valid, listing, .. } => {
                assert_eq!(
                    valid,
                    ["scale", "seed", "octaves", "offset", "colored", "random"]
                );
                assert!(listing.starts_with("valid: .scale .seed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_paths_are_rejected() {
        let (registry, _) = registry();
        assert!(matches!(
            set(&registry, "g.offset.x", "1").unwrap_err(),
            PixlabError::NestedPath { .. }
        ));
    }

    #[test]
    fn listing_follows_declaration_order() {
        let (registry, _) = registry();
        assert_eq!(
            list_properties(&registry, "g").unwrap(),
            [".scale", ".seed", ".octaves", ".offset", ".colored", ".random"]
        );
        assert!(matches!(
            list_properties(&registry, "z").unwrap_err(),
            PixlabError::NodeNotFound { .. }
        ));
    }
}
