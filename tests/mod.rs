// Integration tests for docmig

pub mod unit;
