mod session_tests;
mod user_tests;
