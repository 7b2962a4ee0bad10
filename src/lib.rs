pub mod data_structure;


pub use data_structure::linked_list::LinkedList;
