//! Markup → component tree compilation.
//!
//! The compiler walks an XML document depth-first, resolving each element name through a
//! [`registry::Registry`] of decoders. Each decoder constructs its node and reads its
//! attributes in one step; container variants recurse through [`compiler::compile_children`].

pub(crate) mod attrs;
/// Document walk and compile context.
pub mod compiler;
/// Element name to decoder table.
pub mod registry;
