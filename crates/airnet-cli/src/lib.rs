//! airnet CLI library.
//!
//! Output formatting shared by the `airnet-cli` binary. Query logic lives in
//! `airnet-lib`; this crate only decides how results are printed.

pub mod output;
