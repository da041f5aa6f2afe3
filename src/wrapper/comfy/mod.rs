//! comfy 相关包装

pub mod folder_paths;
