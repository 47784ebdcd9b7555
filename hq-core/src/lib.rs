//! Core types shared by the hq tools: digest arithmetic and small formatting helpers.

pub mod digest;
pub mod util;

pub use digest::{
    DigestSum, HashKind, HashKindParseError, fold_digests, is_hex, normalize_digest, sum_digest,
};
