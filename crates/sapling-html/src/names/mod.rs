//! Name classification shared by the tokenizer and the tree builder.

mod attribute;
mod element;

pub use attribute::AttributeName;
pub use element::{DispatchGroup, ElementFlags, ElementName};
pub use sapling_dom::{DocumentMode, Namespace};
