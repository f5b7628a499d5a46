//! # cloudpayments-cli
//!
//! Operator tooling for the CloudPayments gateway: run one gateway operation
//! per invocation and print the result as JSON.

pub mod commands;
