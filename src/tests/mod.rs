
mod bounds_tests;
mod intern_tests;
mod oblivious_tests;
