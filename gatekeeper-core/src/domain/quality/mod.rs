// gatekeeper-core/src/domain/quality/mod.rs

pub mod assertion;
pub mod guard;
pub mod outcome;
pub mod target;
pub mod value;

pub use assertion::{Assertion, QueryTemplate};
pub use guard::ReadOnlyGuard;
pub use outcome::{CheckResult, GateFailure, GateOutcome};
pub use target::Target;
pub use value::ScalarValue;
