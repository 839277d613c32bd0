// Placement: companies, job postings, applications, interests, admin overview.
// Application fitment comes from the fitment engine, never from a placeholder.

pub mod handlers;
pub mod overview;
pub mod qr;
