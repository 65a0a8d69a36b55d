pub mod avatar;
pub mod profile;
