pub mod linked_list;
pub(crate) mod node;
