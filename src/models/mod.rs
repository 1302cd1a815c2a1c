mod admin;
mod event;
mod inquiry;

pub use admin::{Admin, NewAdmin};
pub use event::{Event, NewEvent};
pub use inquiry::UserInquiry;
