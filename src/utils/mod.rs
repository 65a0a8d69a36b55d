pub mod identity;
pub mod password;
pub mod storage;
pub mod token;
pub mod webutils;
