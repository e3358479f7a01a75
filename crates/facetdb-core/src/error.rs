use crate::types::Id;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Fault
///
/// Contract violations surfaced by the runtime. A fault means the caller
/// (or a desynchronized index tree) broke an invariant; the collection is
/// considered poisoned afterwards and no partial recovery is attempted.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Fault {
    #[error("unknown id: {id}")]
    UnknownId { id: Id },

    #[error("unique index violation: key already bound to id {bound} (incoming id {incoming})")]
    UniqueViolation { bound: Id, incoming: Id },

    #[error("index desynchronized from store: {detail} (id {id})")]
    Desync { id: Id, detail: &'static str },
}

impl Fault {
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        match self {
            Self::UnknownId { .. } | Self::UniqueViolation { .. } => FaultClass::ContractViolation,
            Self::Desync { .. } => FaultClass::Corruption,
        }
    }

    /// Abort the current operation with a classified panic message.
    pub fn raise(self) -> ! {
        panic!("{}: {self}", self.class())
    }
}

///
/// FaultClass
/// Classification of fault conditions for panic messages and tests.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FaultClass {
    ContractViolation,
    Corruption,
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ContractViolation => "contract_violation",
            Self::Corruption => "corruption",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
