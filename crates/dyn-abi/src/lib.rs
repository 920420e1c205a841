// Copyright 2015-2020 Parity Technologies
// Copyright 2023-2023 Alloy Contributors

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Run-time Solidity type model: a `DynSolType`/`DynSolValue` pair that
//! represents a type and a value whose shape is not known until run time,
//! an ABI codec built on top of them, and `Function`/`Event`/`ErrorDef`
//! descriptors for computing selectors and encoding/decoding calls, logs,
//! and custom errors.

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

mod parser;

mod ty;
pub use ty::DynSolType;

mod value;
pub use value::DynSolValue;

pub mod coder;
pub use coder::{decode_params, decode_params_with, decode_single, decode_with_selector, encode_params};

mod function;
pub use function::Function;

mod event;
pub use event::{DecodedEvent, Event, EventParam, IndexedValue};

mod revert;
pub use revert::{dispatch_error, ErrorDef};
