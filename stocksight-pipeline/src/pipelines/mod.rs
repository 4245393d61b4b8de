pub mod reorder_advisory;
