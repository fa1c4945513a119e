//! Coercion of evaluated values into colors and nodes
//!
//! Anywhere an operator expects an image it also accepts an inline color:
//! a number is a gray level, `[l, a]` is gray with alpha, `[r, g, b]` is an
//! opaque color and `[r, g, b, a]` is fully specified.

use crate::errors::{PixlabError, Result};
use crate::eval::Raw;
use crate::log::trace;
use crate::node::{GeneratorKind, Node, NodeRef, PropertyValue};
use crate::session::SessionConfig;
use crate::types::Color;

/// A coerced value: either an existing node or a color
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Color(Color),
    Node(NodeRef),
}

pub fn coerce(raw: Raw) -> Result<Value> {
    match raw {
        Raw::Node(node) => Ok(Value::Node(node)),
        Raw::Color(color) => Ok(Value::Color(color)),
        Raw::Number(lum) => Ok(Value::Color(Color::gray(lum))),
        Raw::Numbers(items) => {
            let color = match items[..] {
                [lum, a] => Color::gray_alpha(lum, a),
                [r, g, b] => Color::rgb(r, g, b),
                [r, g, b, a] => Color::rgba(r, g, b, a),
                _ => {
                    return Err(PixlabError::UnknownArgument {
                        found: Raw::Numbers(items.clone()).to_string(),
                    });
                }
            };
            Ok(Value::Color(color))
        }
    }
}

/// Coerce to a node, wrapping a color in a constant-color generator.
pub fn arg_to_pix(raw: Raw, config: &SessionConfig) -> Result<NodeRef> {
    match coerce(raw)? {
        Value::Node(node) => Ok(node),
        Value::Color(color) => {
            trace!(%color, "wrapping constant color");
            let node = Node::generator(GeneratorKind::Color, config.constant_resolution)
                .with("color", PropertyValue::Color(color))?;
            Ok(node.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resolution;

    #[test]
    fn numbers_widen_to_colors() {
        assert_eq!(coerce(Raw::Number(0.5)).unwrap(), Value::Color(Color::gray(0.5)));
        assert_eq!(
            coerce(Raw::Numbers(vec![0.5, 0.25])).unwrap(),
            Value::Color(Color::rgba(0.5, 0.5, 0.5, 0.25))
        );
        assert_eq!(
            coerce(Raw::Numbers(vec![1.0, 0.0, 0.0])).unwrap(),
            Value::Color(Color::rgba(1.0, 0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn array_and_color_coerce_alike() {
        let from_array = coerce(Raw::Numbers(vec![0.5, 0.2, 0.1, 1.0])).unwrap();
        let from_color = coerce(Raw::Color(Color::rgba(0.5, 0.2, 0.1, 1.0))).unwrap();
        assert_eq!(from_array, from_color);
    }

    #[test]
    fn other_lengths_are_unknown_arguments() {
        for items in [vec![], vec![1.0], vec![1.0, 2.0, 3.0, 4.0, 5.0]] {
            let err = coerce(Raw::Numbers(items)).unwrap_err();
            assert!(matches!(err, PixlabError::UnknownArgument { .. }), "{err:?}");
        }
    }

    #[test]
    fn nodes_pass_through() {
        let node: NodeRef = Node::generator(GeneratorKind::Noise, Resolution::square(4)).into();
        let config = SessionConfig::default();
        let out = arg_to_pix(Raw::Node(node.clone()), &config).unwrap();
        assert!(out.ptr_eq(&node));
        assert!(matches!(coerce(Raw::Node(node)).unwrap(), Value::Node(_)));
    }

    #[test]
    fn colors_become_constant_generators() {
        let config = SessionConfig::default();
        let node = arg_to_pix(Raw::Number(0.5), &config).unwrap();
        let node = node.borrow();
        assert_eq!(node.kind().name(), "color");
        assert_eq!(node.resolution(), Some(Resolution::square(1)));
        assert_eq!(node.get("color"), Some(PropertyValue::Color(Color::gray(0.5))));
    }
}
