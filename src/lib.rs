//! Confluence REST client library
//!
//! Typed access to the Confluence REST API: a builder for CQL queries, the
//! request and response beans, a decoder for polymorphic search results, and
//! asynchronous clients for content, spaces, search and users. The
//! `confluence-rest` binary wraps the clients in a small command-line tool.

pub mod cli;
pub mod client;
pub mod color;
pub mod commands;
pub mod cql;
pub mod credentials;
pub mod domain;
