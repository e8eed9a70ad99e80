// Integration-test harness for tern-types.
//
// Cargo builds one test binary per `tests/*.rs` file; everything lives under `suite/`.

mod suite;
