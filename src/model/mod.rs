//! Starship Record Model
//!
//! Plain data types shared by the HTTP layer and the persistence gateway.
//!
//! The `Franchise` enumeration is a closed set: any value outside it fails
//! request parsing (path segment or JSON body) before it can reach storage.
//! Its wire form is also the value of the container partition key.

pub mod types;
