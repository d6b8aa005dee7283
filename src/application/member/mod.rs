mod errors;
mod member_service;

pub use errors::{MemberApplicationError, Result};
pub use member_service::{delete_member_by_id, get_member_by_id};
