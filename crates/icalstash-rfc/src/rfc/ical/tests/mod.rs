//! End-to-end encoder tests: document in, RFC 5545 text out.
