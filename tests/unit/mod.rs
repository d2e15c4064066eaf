/// Unit tests exercising the public API of the habits tracker library

mod engine_tests;
mod model_tests;
