//! # storefront-api
//!
//! Typed contract layer for the storefront Store API.
//!
//! The platform publishes a catalog of operations keyed by
//! `name method path [headers]`. This crate composes that base catalog with
//! an override set that tightens request and response types to the
//! [`Extended`](storefront_schema::Extended) entity set, then dispatches calls
//! through a [`Transport`](storefront_transport::Transport):
//!
//! ```text
//! caller -> StorefrontApi (optional) -> Dispatcher -> encode -> Transport
//!        <- typed result | Fault   <- normalize <-
//! ```
//!
//! ```rust,ignore
//! use storefront_api::prelude::*;
//!
//! let api = StorefrontApi::from_config(ApiConfig::from_env()?, transport);
//! let listing = api.search("shirt", ProductListingCriteria::default()).await?;
//! for product in listing.products() {
//!     println!("{}", product.display_name().unwrap_or_default());
//! }
//! ```

pub mod base;
pub mod catalog;
pub mod config;
pub mod contract;
pub mod dispatch;
pub mod encode;
pub mod facade;
pub mod fault;
pub mod key;
pub mod operation;
pub mod overrides;

pub use base::{base_operations, ReadContext};
pub use catalog::{compose, storefront_catalog, Catalog, OperationSet, Origin};
pub use config::{ApiConfig, ApiType, ConfigError};
pub use contract::{
    ListStyle, OperationContract, ParamSpec, ParamType, Parameters, RequestBody, ResponseSchema,
    SchemaRef, Shape,
};
pub use dispatch::Dispatcher;
pub use encode::{encode, encode_component, percent_encode};
pub use facade::{BestEffort, StorefrontApi};
pub use fault::{normalize, ApiErrorDetail, ApiErrorPayload, Fault, FaultKind, ProtocolFault};
pub use key::{KeyError, OperationKey, PathTemplate};
pub use operation::{NoParams, Operation};
pub use overrides::override_operations;

/// Common imports for callers.
pub mod prelude {
    pub use crate::config::{ApiConfig, ApiType};
    pub use crate::dispatch::Dispatcher;
    pub use crate::facade::{BestEffort, StorefrontApi};
    pub use crate::fault::{Fault, FaultKind};
    pub use crate::operation::Operation;
    pub use storefront_schema::prelude::*;
    pub use storefront_transport::{Transport, TransportError};
}
