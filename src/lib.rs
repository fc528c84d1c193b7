//! Payroll computation engine.
//!
//! This crate computes gross pay, flat-rate tax withholding, deductions
//! and net pay for salaried employees, and keeps employees, pay periods
//! and payroll entries in in-memory record stores with a pure, reducer
//! style mutation discipline.
//!
//! The entry point for most callers is [`payroll::Payroll`], which owns
//! the stores and the rate configuration and exposes read helpers through
//! [`payroll::PayrollQueries`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod store;
