//! HTML format tests
//!
//! Export is the preview renderer; import exists so preview output can be
//! read back, which is what the idempotence tests lean on.

mod export;
mod import;
