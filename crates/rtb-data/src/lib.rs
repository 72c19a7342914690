//! RTB Data Helpers
//!
//! Small, non-interactive helpers from the toolbox:
//!
//! - [`records`]: search and re-key lists of JSON-like records
//! - [`network`]: IPv4 validation/sorting and MAC normalization

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod network;
pub mod records;

pub use error::DataError;
pub use network::{convert_mac, is_ipv4_address, sort_ipv4_addresses, MacFormat};
pub use records::{
    find_first_containing, index_by_key, search_containing, search_equal, search_regex, value_text,
};
