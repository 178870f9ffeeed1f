pub mod guards;
pub mod media;
pub mod payment;
pub mod policy;
pub mod pricing;
pub mod scope;
pub mod session;
