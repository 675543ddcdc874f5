//! Operation sets and the composed catalog.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::base::base_operations;
use crate::contract::OperationContract;
use crate::fault::Fault;
use crate::overrides::override_operations;

/// Contracts keyed by operation name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationSet {
    contracts: BTreeMap<String, OperationContract>,
}

impl OperationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a contract, replacing any contract of the same name.
    pub fn insert(&mut self, contract: OperationContract) -> Option<OperationContract> {
        self.contracts.insert(contract.name().to_string(), contract)
    }

    pub fn get(&self, name: &str) -> Option<&OperationContract> {
        self.contracts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationContract> {
        self.contracts.values()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl FromIterator<OperationContract> for OperationSet {
    fn from_iter<I: IntoIterator<Item = OperationContract>>(iter: I) -> Self {
        let mut set = OperationSet::new();
        for contract in iter {
            set.insert(contract);
        }
        set
    }
}

/// Where a catalog entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Base,
    Override,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Base => f.write_str("base"),
            Origin::Override => f.write_str("override"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    contract: OperationContract,
    origin: Origin,
}

/// The composed, read-only operation catalog.
///
/// Entries can be looked up by bare name (`readCart`) or by full key
/// (`readCart get /checkout/cart?name`); a full key must match the registered
/// key exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, Entry>,
}

/// Compose a catalog: every override replaces the base contract of the same
/// name as a whole; names only in `overrides` are added.
pub fn compose(base: &OperationSet, overrides: &OperationSet) -> Catalog {
    let mut entries: BTreeMap<String, Entry> = base
        .iter()
        .filter(|contract| !overrides.contains(contract.name()))
        .map(|contract| {
            let entry = Entry {
                contract: contract.clone(),
                origin: Origin::Base,
            };
            (contract.name().to_string(), entry)
        })
        .collect();

    for contract in overrides.iter() {
        let entry = Entry {
            contract: contract.clone(),
            origin: Origin::Override,
        };
        entries.insert(contract.name().to_string(), entry);
    }

    Catalog { entries }
}

impl Catalog {
    fn entry(&self, key: &str) -> Option<&Entry> {
        let key = key.trim();
        let name = key.split_whitespace().next()?;
        let entry = self.entries.get(name)?;
        if name.len() == key.len() || entry.contract.key.to_string() == key {
            Some(entry)
        } else {
            None
        }
    }

    /// Look up a contract by name or full key.
    pub fn get(&self, key: &str) -> Option<&OperationContract> {
        self.entry(key).map(|entry| &entry.contract)
    }

    /// Like [`Catalog::get`], failing with [`Fault::UnknownOperation`].
    pub fn contract(&self, key: &str) -> Result<&OperationContract, Fault> {
        self.get(key)
            .ok_or_else(|| Fault::UnknownOperation(key.to_string()))
    }

    /// Whether the entry for `key` came from the base or the override set.
    pub fn origin(&self, key: &str) -> Option<Origin> {
        self.entry(key).map(|entry| entry.origin)
    }

    /// All contracts, ordered by name.
    pub fn operations(&self) -> impl Iterator<Item = &OperationContract> {
        self.entries.values().map(|entry| &entry.contract)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static STOREFRONT_CATALOG: Lazy<Arc<Catalog>> =
    Lazy::new(|| Arc::new(compose(&base_operations(), &override_operations())));

/// The storefront catalog: generic operations with the storefront overrides
/// applied. Built on first use and shared afterwards.
pub fn storefront_catalog() -> Arc<Catalog> {
    Arc::clone(&STOREFRONT_CATALOG)
}
