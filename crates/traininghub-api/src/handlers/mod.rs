//! Request handlers

pub mod account;
pub mod auth;
pub mod entries;
pub mod health;
pub mod leads;
pub mod menus;
pub mod pages;
pub mod subscribe;
