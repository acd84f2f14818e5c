pub mod tree;
pub mod descriptor_ops;

mod macros;
