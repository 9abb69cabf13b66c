pub use crate::error::{EgResult, Error};
pub use crate::types::{AuthorizationSnapshot, OrgMembership, SessionInfo, User, UserId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
