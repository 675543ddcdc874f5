//! Typed operations.
//!
//! A typed operation names a catalog entry by its full key and fixes the
//! Rust types of its parameters and of its success response. Parameters are
//! serialized to one flat JSON object; the dispatcher splits it into path,
//! query, header and body parts according to the contract.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::contract::OperationContract;

/// An operation with statically known parameter and response types.
pub trait Operation {
    /// Full operation key, e.g. `readCart get /checkout/cart?name`.
    const KEY: &'static str;

    /// Flat parameter object.
    type Params: Serialize + Sync;

    /// Body of a successful response.
    type Response: DeserializeOwned;

    /// The contract the types above are written against.
    fn contract() -> OperationContract;

    /// Operation name, the first word of [`Operation::KEY`].
    fn name() -> &'static str {
        Self::KEY.split(' ').next().unwrap_or(Self::KEY)
    }
}

/// Parameters of an operation that takes none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NoParams {}
