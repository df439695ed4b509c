mod helpers;
mod join_code_test;
