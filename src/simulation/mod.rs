//! Random group generation for stress testing.
