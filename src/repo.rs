mod submissions;

pub use submissions::SubmissionRepo;
