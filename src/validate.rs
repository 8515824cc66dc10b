//! Dependency validation.
//!
//! Walks a chain left to right and checks that every unit only reads keys an
//! earlier unit has promised to write. Runs once per endpoint at startup; the
//! request path never calls into this module.

use std::fmt;

use thiserror::Error;

use crate::contract::{Available, Contract, Keys};

/// Where in a chain a violation was found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Zero-based position in the effective ware list.
    Ware(usize),
    Handler,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ware(i) => write!(f, "ware #{i}"),
            Self::Handler => f.write_str("handler"),
        }
    }
}

/// A unit declares inputs nothing before it in the chain provides.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{stage} `{unit}` is not receiving input {}", join(.missing))]
pub struct ContractViolation {
    pub unit: String,
    pub stage: Stage,
    pub missing: Keys,
}

fn join(keys: &Keys) -> String {
    keys.iter().map(|k| format!("`{k}`")).collect::<Vec<_>>().join(", ")
}

/// Checks `chain` followed by `terminal`, starting with nothing available.
///
/// Stops at the first unit with uncovered inputs. Order matters: a later
/// unit's outputs never satisfy an earlier unit's inputs.
pub fn validate<'a, I>(chain: I, terminal: &Contract) -> Result<(), ContractViolation>
where
    I: IntoIterator<Item = &'a Contract>,
{
    validate_from(Available::new(), chain, terminal)
}

/// Like [`validate`], but starting from keys already in the store when the
/// chain begins.
pub fn validate_from<'a, I>(
    mut available: Available,
    chain: I,
    terminal: &Contract,
) -> Result<(), ContractViolation>
where
    I: IntoIterator<Item = &'a Contract>,
{
    for (i, unit) in chain.into_iter().enumerate() {
        check(&available, unit, Stage::Ware(i))?;
        available.absorb(unit);
    }
    check(&available, terminal, Stage::Handler)
}

fn check(available: &Available, unit: &Contract, stage: Stage) -> Result<(), ContractViolation> {
    let missing = available.missing(unit);
    if missing.is_empty() {
        return Ok(());
    }
    Err(ContractViolation { unit: unit.name().to_owned(), stage, missing })
}
