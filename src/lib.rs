//! End-to-end tests for the LS-8 toolchain live in `tests/`.
