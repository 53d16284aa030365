//! Workflow rules that need no store access: derived values, the pairing
//! status machine, candidate availability, and interest eligibility.

pub mod age;
pub mod biodata;
pub mod candidates;
pub mod eligibility;
pub mod pairing;
pub mod slug;
pub mod status;
pub mod tier;

pub use age::{age_on, age_today};
pub use biodata::{MaritalStatus, Sex};
pub use candidates::CandidatePool;
pub use eligibility::{check_interest, Ineligible, Viewer};
pub use pairing::{orient, Orientation, PairingRuleError};
pub use slug::slugify;
pub use status::{StatusChange, StatusPolicy, TaarufStatus, TransitionError};
pub use tier::MediatorTier;
