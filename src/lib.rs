//! pixlab: compile short text commands into image-operator graphs.
//!
//! A [`Session`] owns a registry of named nodes. Each command line either
//! builds a node (`g = noise(512x512)`), mutates a live property
//! (`g.scale = 2*3`), lists properties (`g.`), or compiles an expression into
//! a node for the renderer (`g + 0.5`).
//!
//! ```
//! use pixlab::{Outcome, Session};
//!
//! let mut session = Session::new();
//! session.execute("g = noise(512x512)").unwrap();
//! session.execute("g.scale = 2*3").unwrap();
//! let Outcome::Render(node) = session.execute("g + 0.5").unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(node.borrow().kind().name(), "blend");
//! ```

use pest_derive::Parser;

pub mod assign;
pub mod ast;
pub mod coerce;
pub mod compile;
pub mod errors;
pub mod eval;
pub mod log;
pub mod node;
pub mod operators;
pub mod parse;
pub mod registry;
pub mod session;
pub mod types;

pub use errors::{PixlabError, Result};
pub use node::{Node, NodeKind, NodeRef, PropertyKind, PropertyValue};
pub use registry::Registry;
pub use session::{Outcome, Session, SessionConfig, is_assignment};
pub use types::{Color, Point, Rect, Resolution, Size};

#[derive(Parser)]
#[grammar = "pixlab.pest"]
pub struct PixlabParser;
