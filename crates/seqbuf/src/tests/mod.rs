mod char_buffer_scenarios;
pub mod utils;
