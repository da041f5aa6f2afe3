//! 文件夹路径
//!
//! ComfyUI folder_paths 的精简镜像, 仅保留本节点包用到的目录

use std::{
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;

use crate::error::Error;

lazy_static! {
    /// 全局目录配置, 以 ComfyUI 进程工作目录为基础路径
    pub static ref FOLDER_PATHS: FolderPaths = FolderPaths::default();
}

/// 文件夹路径配置结构体
#[derive(Debug)]
pub struct FolderPaths {
    /// 基础路径
    base_path: PathBuf,
    /// 输出目录
    output_directory: PathBuf,
    /// 临时目录
    temp_directory: PathBuf,
    /// 输入目录
    input_directory: PathBuf,
    /// 用户目录
    user_directory: PathBuf,
}

impl Default for FolderPaths {
    fn default() -> Self {
        let base_path = std::env::current_dir().expect("Failed to get current directory");
        Self::from_base_directory(&base_path)
    }
}

impl FolderPaths {
    /// 创建新的FolderPaths实例
    pub fn from_base_directory(base_directory: impl AsRef<Path>) -> Self {
        let base_path = base_directory.as_ref().to_path_buf();

        Self {
            output_directory: base_path.join("output"),
            temp_directory: base_path.join("temp"),
            input_directory: base_path.join("input"),
            user_directory: base_path.join("user"),
            base_path,
        }
    }

    /// 获取基础路径
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// 获取输入目录
    pub fn input_directory(&self) -> &Path {
        &self.input_directory
    }

    /// 获取用户目录
    pub fn user_directory(&self) -> &Path {
        &self.user_directory
    }

    /// 用户目录下的文件路径
    pub fn user_file(&self, filename: &str) -> PathBuf {
        self.user_directory.join(filename)
    }

    /// 解析带注解的文件名
    ///
    /// ComfyUI 约定: "name [input]" / "name [output]" / "name [temp]",
    /// 无注解时默认输入目录
    pub fn get_annotated_filepath(&self, name: &str) -> PathBuf {
        let (name, base_dir) = self.annotated_basedir(name);
        base_dir.join(name)
    }

    fn annotated_basedir<'a>(&self, name: &'a str) -> (&'a str, &Path) {
        if let Some(stripped) = name.strip_suffix(" [input]") {
            (stripped, &self.input_directory)
        } else if let Some(stripped) = name.strip_suffix(" [output]") {
            (stripped, &self.output_directory)
        } else if let Some(stripped) = name.strip_suffix(" [temp]") {
            (stripped, &self.temp_directory)
        } else {
            (name, &self.input_directory)
        }
    }

    /// 输入目录的文件列表, 单层扫描, 按名称排序
    pub fn input_files(&self) -> Result<Vec<String>, Error> {
        if !self.input_directory.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.input_directory)? {
            let entry = entry?;
            if entry.path().is_file() {
                files.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotated_filepath() {
        let folder_paths = FolderPaths::from_base_directory("/comfy");
        assert_eq!(
            folder_paths.get_annotated_filepath("a.png"),
            PathBuf::from("/comfy/input/a.png")
        );
        assert_eq!(
            folder_paths.get_annotated_filepath("a.png [output]"),
            PathBuf::from("/comfy/output/a.png")
        );
        assert_eq!(
            folder_paths.get_annotated_filepath("a.png [temp]"),
            PathBuf::from("/comfy/temp/a.png")
        );
    }

    #[test]
    fn test_user_file() {
        let folder_paths = FolderPaths::from_base_directory("/comfy");
        assert_eq!(
            folder_paths.user_file("lora_presets.json"),
            PathBuf::from("/comfy/user/lora_presets.json")
        );
    }

    #[test]
    fn test_input_files_missing_directory() -> anyhow::Result<()> {
        let folder_paths = FolderPaths::from_base_directory("/nonexistent-comfy");
        assert!(folder_paths.input_files()?.is_empty());
        Ok(())
    }
}
