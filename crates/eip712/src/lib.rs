// Copyright 2015-2020 Parity Technologies
// Copyright 2023-2023 Alloy Contributors

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [EIP-712](https://eips.ethereum.org/EIPS/eip-712) typed structured data
//! hashing and signing.
//!
//! Resolves a `types` dependency graph into canonical `encodeType` strings,
//! hashes named struct instances per `hashStruct`, and produces the final
//! `0x1901`-prefixed signing hash for a [`TypedData`] payload.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate alloc;

mod error;
pub use error::{Error, Result};

mod domain;
pub use domain::Eip712Domain;

mod resolver;
pub use resolver::{PropertyDef, Resolver, TypeDef};

mod coerce;
pub use coerce::coerce;

mod typed_data;
pub use typed_data::{Types, TypedData};
