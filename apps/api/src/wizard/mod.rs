// Intake wizard: the step-by-step flow that collects a user's answers and
// hands them to the configured ranker once the last step is submitted.

pub mod handlers;
pub mod session;
