//! Background refresh for Shelf.
//!
//! [`RefreshRunner`] rebuilds the library snapshot on a fixed delay until
//! it is told to stop. A failed rebuild is logged and retried on the next
//! tick; the last good snapshot keeps serving queries in the meantime.

pub mod runner;

pub use runner::RefreshRunner;
