// Integration-test harness for tern-refactor.
//
// Cargo builds one test binary per `tests/*.rs` file; every integration test lives under
// `tests/suite/` so they share a single binary.

mod suite;
