//! 文件名处理
//!
//! 与 Python os.path.basename / os.path.splitext 语义保持一致

/// 路径的最后一段, 同时支持 `/` 与 `\` 分隔符
pub fn file_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// 去掉最后一个扩展名
///
/// 文件名开头的点不算扩展名分隔符, ".hidden" 原样返回
pub fn strip_extension(name: &str) -> &str {
    let stem_start = name.chars().take_while(|c| *c == '.').count();
    match name[stem_start..].rfind('.') {
        Some(idx) => &name[..stem_start + idx],
        None => name,
    }
}

/// 路径 -> 去扩展名的文件名
pub fn filename_no_ext(path: &str) -> &str {
    strip_extension(file_basename(path))
}
