pub mod math;
pub mod normalizer;
pub mod stop_words;
