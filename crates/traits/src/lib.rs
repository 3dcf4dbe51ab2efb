pub mod dom;
pub mod memory;
pub mod selector;

pub use dom::{Dom, DomError, ScrollBehavior};
pub use memory::{InMemoryDom, NodeId, ScrollRequest};
pub use selector::{Compound, SelectorList};
