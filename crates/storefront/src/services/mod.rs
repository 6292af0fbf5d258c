//! Higher-level operations composed from the client and the stores.

pub mod checkout;
