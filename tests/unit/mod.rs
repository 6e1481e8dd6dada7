mod handle_tests;
mod ladder_property_tests;
mod reconciliation_tests;
