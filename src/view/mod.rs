pub mod index_renderer;
pub mod tag_groups;
