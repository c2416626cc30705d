// Profile image uploads. Only images pass validation; storage goes through
// the `ImageStore` seam carried in `AppState`.

pub mod handlers;
pub mod storage;
pub mod validation;
