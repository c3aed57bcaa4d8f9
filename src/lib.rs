pub mod config;
pub mod content;
pub mod logger;
pub mod post_list;
pub mod post_processor;
pub mod text_utils;
pub mod view;
mod test_data;
