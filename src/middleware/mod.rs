pub mod company;
pub mod error_handler;
pub mod request_id;

pub use company::{CompanyId, COMPANY_HEADER};
pub use error_handler::ErrorHandler;
pub use request_id::{RequestId, RequestIdValue, REQUEST_ID_HEADER};
