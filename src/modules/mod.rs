pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod identity;
pub mod rules;
pub mod storage;
pub mod sync;
pub mod teams;
