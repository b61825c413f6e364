pub mod ielts;
pub mod proofread;
pub mod toeic;
pub mod weakness;
pub mod word;
