//! EVM ABI type system, encoder/decoder, and EIP-712 typed-data hashing,
//! bundled behind a single dependency.
//!
//! This crate only re-exports [`evmabi_primitives`] and, behind their
//! eponymous features, [`evmabi_dyn_abi`] and [`evmabi_eip712`] — pull in
//! the individual crates directly if you only need one of them.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[doc(inline)]
pub use evmabi_primitives as primitives;
#[doc(no_inline)]
pub use primitives::uint;

#[cfg(feature = "dyn-abi")]
#[doc(inline)]
pub use evmabi_dyn_abi as dyn_abi;

#[cfg(feature = "eip712")]
#[doc(inline)]
pub use evmabi_eip712 as eip712;
