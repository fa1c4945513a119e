//! Concrete operator kinds, grouped by category
//!
//! The constructor name of a kind is the function name used in expressions.

use super::catalog::{self, PropertyDescriptor};

/// How many node inputs a kind takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// No node inputs; built from a resolution
    Generator,
    /// Exactly one node input
    SingleEffect,
    /// Exactly two node inputs, A and B
    MergerEffect,
    /// One or more node inputs
    MultiEffect,
}

macro_rules! kinds {
    (
        $(#[$meta:meta])*
        $enum:ident {
            $($variant:ident => $name:literal, $table:path;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $enum {
            $($variant,)*
        }

        impl $enum {
            pub const ALL: &'static [$enum] = &[$($enum::$variant,)*];

            /// Constructor name
            pub fn name(self) -> &'static str {
                match self {
                    $($enum::$variant => $name,)*
                }
            }

            pub fn properties(self) -> &'static [PropertyDescriptor] {
                match self {
                    $($enum::$variant => $table,)*
                }
            }
        }
    };
}

kinds! {
    /// Image sources
    GeneratorKind {
        Color => "color", catalog::COLOR;
        Circle => "circle", catalog::CIRCLE;
        Rectangle => "rectangle", catalog::RECTANGLE;
        Polygon => "polygon", catalog::POLYGON;
        Gradient => "gradient", catalog::GRADIENT;
        Noise => "noise", catalog::NOISE;
    }
}

kinds! {
    /// One-input filters
    SingleEffectKind {
        Blur => "blur", catalog::BLUR;
        Levels => "levels", catalog::LEVELS;
        Transform => "transform", catalog::TRANSFORM;
        Crop => "crop", catalog::CROP;
        Threshold => "threshold", catalog::THRESHOLD;
        Edge => "edge", catalog::EDGE;
        Tint => "tint", catalog::TINT;
        Flip => "flip", catalog::FLIP_FLOP;
        Clamp => "clamp", catalog::CLAMP;
    }
}

kinds! {
    /// Two-input combinators
    MergerEffectKind {
        Blend => "blend", catalog::BLEND;
        Displace => "displace", catalog::DISPLACE;
        Cross => "cross", catalog::CROSS;
        Lookup => "lookup", catalog::LOOKUP;
    }
}

kinds! {
    /// Variadic combinators
    MultiEffectKind {
        Blends => "blends", catalog::BLENDS;
        Stack => "stack", catalog::STACK;
    }
}

/// A concrete kind tagged with its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Generator(GeneratorKind),
    SingleEffect(SingleEffectKind),
    MergerEffect(MergerEffectKind),
    MultiEffect(MultiEffectKind),
}

impl NodeKind {
    pub fn category(self) -> Category {
        match self {
            NodeKind::Generator(_) => Category::Generator,
            NodeKind::SingleEffect(_) => Category::SingleEffect,
            NodeKind::MergerEffect(_) => Category::MergerEffect,
            NodeKind::MultiEffect(_) => Category::MultiEffect,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Generator(k) => k.name(),
            NodeKind::SingleEffect(k) => k.name(),
            NodeKind::MergerEffect(k) => k.name(),
            NodeKind::MultiEffect(k) => k.name(),
        }
    }

    /// The descriptor table for this kind
    pub fn properties(self) -> &'static [PropertyDescriptor] {
        match self {
            NodeKind::Generator(k) => k.properties(),
            NodeKind::SingleEffect(k) => k.properties(),
            NodeKind::MergerEffect(k) => k.properties(),
            NodeKind::MultiEffect(k) => k.properties(),
        }
    }

    /// Every constructible kind, generators first
    pub fn all() -> impl Iterator<Item = NodeKind> {
        let generators = GeneratorKind::ALL.iter().copied().map(NodeKind::Generator);
        let singles = SingleEffectKind::ALL.iter().copied().map(NodeKind::SingleEffect);
        let mergers = MergerEffectKind::ALL.iter().copied().map(NodeKind::MergerEffect);
        let multis = MultiEffectKind::ALL.iter().copied().map(NodeKind::MultiEffect);
        generators.chain(singles).chain(mergers).chain(multis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_declares_unique_properties() {
        for kind in NodeKind::all() {
            let props = kind.properties();
            assert!(!props.is_empty(), "{} has no properties", kind.name());
            let unique: HashSet<_> = props.iter().map(|d| d.name).collect();
            assert_eq!(unique.len(), props.len(), "{} repeats a property", kind.name());
        }
    }

    #[test]
    fn constructor_names_are_unique() {
        let names: HashSet<_> = NodeKind::all().map(NodeKind::name).collect();
        assert_eq!(names.len(), NodeKind::all().count());
    }

    #[test]
    fn mergers_share_placement_and_extend() {
        for kind in MergerEffectKind::ALL {
            let names: Vec<_> = kind.properties().iter().map(|d| d.name).collect();
            assert!(names.contains(&"placement"), "{} lacks placement", kind.name());
            assert!(names.contains(&"extend"), "{} lacks extend", kind.name());
        }
    }
}
