pub mod response;
pub mod send;

pub use response::Response;
pub use send::post_form;
