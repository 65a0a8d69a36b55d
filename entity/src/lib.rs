pub mod user;
pub mod article;
pub mod contact;

/*
 Every article and contact belongs to exactly one user. The owning column is
 written once at insert time and never reassigned; deleting a user cascades to
 everything they own.
 */
