mod cors_tests;
mod generic_tests;
