//! 节点分类

/// 文本
pub const CATEGORY_TEXT: &str = "PowerPresets/Text";
/// 实用工具
pub const CATEGORY_UTILS: &str = "PowerPresets/Utils";
/// 图片
pub const CATEGORY_IMAGE: &str = "PowerPresets/Image";
