//! Parser tests.
//!
//! - `parser`: literals, lists, quoting, comments and error cases
//! - `properties`: proptest checks over generated source text

mod parser;
