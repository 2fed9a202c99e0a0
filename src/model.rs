//! Session-owned records: conversation log, applicant, loan application

pub mod applicant;
pub mod application;
pub mod transcript;

pub use applicant::ApplicantProfile;
pub use application::{LoanApplication, Stage};
pub use transcript::{Message, Speaker, Transcript};
