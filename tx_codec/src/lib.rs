//! Compact binary codec for rollup transactions.
//!
//! Fraud-proof and validation logic must be able to reconstruct exact
//! transaction semantics from minimal on-chain bytes, so the layout is
//! canonical: one-byte kind discriminant first, then big-endian fields,
//! tightly packed. [`types`] holds the sum-typed object graph, [`encode`]
//! the serializers, and [`decode`] the bounds-checked parsers; every decoder
//! reports the byte length it consumed, which is how containers advance
//! through their record lists.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]

pub mod decode;
pub mod encode;
pub mod error;
pub mod types;
