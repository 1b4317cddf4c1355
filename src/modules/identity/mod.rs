pub mod resolver;

pub use resolver::ItemKey;
