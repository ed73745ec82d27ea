pub mod ordered_index;
