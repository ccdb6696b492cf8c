pub mod invitation_code;
pub mod member;

pub use invitation_code::InvitationCode;
pub use member::{Member, MemberStatus};
