pub mod copy;
pub mod head;
pub mod r#move;
pub mod options;
pub mod propfind;
