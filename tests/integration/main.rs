
mod cli_tests;
mod conversion_tests;
