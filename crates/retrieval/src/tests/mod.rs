//! Integration tests for the retrieval pipeline.
