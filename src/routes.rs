pub mod actions;
pub mod index;
pub mod roster;
pub mod sse;
pub mod student_in_detail;
