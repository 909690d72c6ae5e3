//! File-backed repositories for donors, blood requests and NGO contact requests.

pub mod donors;
pub mod ngo;
pub mod requests;
pub mod samples;
pub(crate) mod shared;
