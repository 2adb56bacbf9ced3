pub mod input_row;
pub mod work_item;
