//! Domain model (period, policy, outcomes, errors).

pub mod errors;
pub mod outcome;
pub mod period;
pub mod policy;

pub use self::errors::{ErrorKind, RetentionError, StoreError};
pub use self::outcome::{CleanupReport, TickOutcome};
pub use self::period::{ParsePeriodError, RetentionPeriod};
pub use self::policy::RetentionPolicy;
