mod submissions;

pub use submissions::{parse_submission_id, NewSubmission, Submission, SubmissionPayload};
