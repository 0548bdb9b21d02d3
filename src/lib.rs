//! # chainspec
//!
//! ChainSpec: turns a markdown smart-contract specification into a structured
//! record and a Solidity contract skeleton.
//!
//! This crate provides:
//! - A tolerant markdown parser producing [`ContractSpec`] records
//! - A template renderer that fills `{{TOKEN}}` placeholders with imports,
//!   inheritance, declarations and function scaffolds derived from the record
//! - Writers for rendered contracts and JSON records
//! - CLI tool (`chainspec`) for parsing, generating and batch runs
//!
//! ## Usage
//!
//! ```rust
//! use chainspec::generator::MemoryTemplateStore;
//! use chainspec::pipeline::{generate, GenerateRequest};
//!
//! let request = GenerateRequest {
//!     markdown: "## Contract Name\nMy Token\n".to_string(),
//!     template_name: None,
//! };
//! let response = generate(&request, &MemoryTemplateStore::builtin()).unwrap();
//! assert_eq!(response.template_used, "ERC20_Template");
//! assert!(response.code.contains("contract My_Token"));
//! ```
//!
//! Parsing never fails: missing sections and malformed lines degrade to empty
//! values. Rendering fails only when the requested template does not exist.

pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::ChainspecConfig;
pub use error::{Error, Result};
pub use generator::{render, Renderer, TemplateStore};
pub use parser::{parse, parse_directory, parse_file, ContractSpec};
pub use pipeline::{generate, GenerateRequest, GenerateResponse};
