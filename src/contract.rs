//! Declared input/output contracts.
//!
//! Every ware and handler carries a [`Contract`]: a name plus the set of store
//! keys it reads and the set it promises to write. Contracts are plain data.
//! Nothing here runs at request time.

use std::collections::BTreeSet;

/// A set of store keys. Ordered so that error messages and logs are stable.
pub type Keys = BTreeSet<String>;

/// The `{name, inputs, outputs}` triple declared by one unit of a chain.
///
/// `outputs` is a promise, not a check: the validator trusts that a unit which
/// declares a key will set it before delegating.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Contract {
    name: String,
    inputs: Keys,
    outputs: Keys,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), inputs: Keys::new(), outputs: Keys::new() }
    }

    /// Adds keys this unit reads from the store.
    pub fn inputs<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.inputs.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Adds keys this unit writes to the store.
    pub fn outputs<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.outputs.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn input_keys(&self) -> &Keys { &self.inputs }
    pub fn output_keys(&self) -> &Keys { &self.outputs }
}

/// Keys available at a given point of a chain.
///
/// Starts empty for every endpoint and grows by each unit's outputs once that
/// unit has been checked.
#[derive(Clone, Debug, Default)]
pub struct Available {
    keys: Keys,
}

impl Available {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from keys something upstream of the chain already provides.
    pub fn seeded<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self { keys: keys.into_iter().map(Into::into).collect() }
    }

    /// Returns the inputs of `contract` that are not available yet.
    /// Empty means the contract is satisfied.
    pub fn missing(&self, contract: &Contract) -> Keys {
        contract.inputs.difference(&self.keys).cloned().collect()
    }

    pub fn absorb(&mut self, contract: &Contract) {
        self.keys.extend(contract.outputs.iter().cloned());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> &Keys { &self.keys }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_keys_as_sets() {
        let c = Contract::new("w").inputs(["b", "a", "a"]).outputs(["x"]);
        assert_eq!(c.name(), "w");
        assert_eq!(c.input_keys().iter().collect::<Vec<_>>(), ["a", "b"]);
        assert!(c.output_keys().contains("x"));
    }

    #[test]
    fn missing_reports_only_uncovered_inputs() {
        let available = Available::seeded(["hello", "world"]);
        let c = Contract::new("h").inputs(["hello", "foo", "bar"]);
        let missing: Vec<_> = available.missing(&c).into_iter().collect();
        assert_eq!(missing, ["bar", "foo"]);
    }

    #[test]
    fn absorb_adds_outputs() {
        let mut available = Available::new();
        assert!(!available.contains("k"));
        available.absorb(&Contract::new("w").outputs(["k"]));
        assert!(available.contains("k"));
        assert!(available.missing(&Contract::new("r").inputs(["k"])).is_empty());
    }
}
