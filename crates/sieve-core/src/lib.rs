//! Sieve Core Types
//!
//! This crate provides the data model shared by the Sieve parser and compiler:
//!
//! - **Namespaces**: the fixed namespace table ([`namespace::NamespaceId`])
//! - **Entities**: named elements and attributes ([`entity::NamedEntity`], [`entity::ElementRecord`])
//! - **Documents**: the allow-list policy being compiled ([`document::Document`])
//! - **Name lists**: flat, namespace-tagged lists of names ([`name_list::NameList`])

pub mod document;
pub mod entity;
pub mod name_list;
pub mod namespace;
