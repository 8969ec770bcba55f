//! UIコンポーネント

pub mod exif_upload;
pub mod flag_search;
pub mod header;
pub mod idea_list;
pub mod result_view;
pub mod tool_form;
