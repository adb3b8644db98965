//! Disassembler for OMM ampersand modules: a 16-byte header, 65802 code
//! ended by a zero terminator, a zero-word-terminated table of immediate
//! pointers, and free-form data that may embed a tokenized ampersand
//! command table.

pub mod amper;
pub mod emit;
pub mod error;
pub mod header;
pub mod labels;
pub mod scan;
pub mod symbols;

pub use emit::disassemble;
pub use error::Error;
