// Booking requests from job-seekers and the consultant-side dashboard.

pub mod handlers;
pub mod request;
pub mod status;
