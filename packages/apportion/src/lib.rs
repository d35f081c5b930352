#![allow(unused_doc_comments)]
pub mod distribution;
pub mod distributor;
pub mod error;
pub mod ledger;
pub mod math;
pub mod types;
