// Member workflows - multi-step orchestration over activities

pub mod activate_member;

pub use activate_member::{activate_member, ActivateMemberRequest};
