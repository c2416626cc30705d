pub mod consultant;
pub mod consultation;
pub mod review;
