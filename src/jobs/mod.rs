//! Background jobs processed through apalis with Postgres storage.

mod email_job;

pub use email_job::{email_job_handler, EmailJob};
