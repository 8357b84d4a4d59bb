//! End-to-end tests for the smoke harness.

#![cfg(unix)]

mod scenarios;
