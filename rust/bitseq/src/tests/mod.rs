mod edit_tests;
mod model_tests;
