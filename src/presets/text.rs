//! 文本预设存储
//!
//! 两级映射: category -> name -> text

use indexmap::IndexMap;

use crate::{error::Error, presets::store::StoreBackend};

/// 插入顺序保留, 与 Python dict 的序列化行为一致
pub type TextPresets = IndexMap<String, IndexMap<String, String>>;

/// 文本预设服务
pub struct TextPresetService<B> {
    backend: B,
}

impl<B> TextPresetService<B>
where
    B: StoreBackend<TextPresets>,
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn list(&self) -> Result<TextPresets, Error> {
        self.backend.load()
    }

    /// 首次写入时创建分类
    pub fn upsert(&self, category: &str, name: &str, text: &str) -> Result<TextPresets, Error> {
        let mut presets = self.backend.load()?;

        presets
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), text.to_string());

        self.backend.save(&presets)?;
        Ok(presets)
    }

    /// name 为 None 时删除整个分类
    ///
    /// 删除分类下最后一个条目时分类保留为空(原始行为, 不做修剪)
    pub fn delete(&self, category: &str, name: Option<&str>) -> Result<TextPresets, Error> {
        let mut presets = self.backend.load()?;

        match name {
            Some(name) => {
                let Some(entries) = presets.get_mut(category) else {
                    return Err(Error::CategoryNotFound(category.to_string()));
                };
                if entries.shift_remove(name).is_none() {
                    return Err(Error::PresetNotFound(name.to_string()));
                }
            }
            None => {
                if presets.shift_remove(category).is_none() {
                    return Err(Error::CategoryNotFound(category.to_string()));
                }
            }
        }

        self.backend.save(&presets)?;
        Ok(presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::store::MemoryStore;

    fn service() -> TextPresetService<MemoryStore<TextPresets>> {
        TextPresetService::new(MemoryStore::default())
    }

    #[test]
    fn test_upsert_creates_category() -> anyhow::Result<()> {
        let service = service();
        let presets = service.upsert("quality", "high", "masterpiece, best quality")?;

        assert_eq!(
            presets["quality"]["high"],
            "masterpiece, best quality".to_string()
        );
        Ok(())
    }

    #[test]
    fn test_upsert_is_idempotent() -> anyhow::Result<()> {
        let service = service();
        service.upsert("quality", "high", "a")?;
        service.upsert("quality", "high", "a")?;

        let presets = service.list()?;
        assert_eq!(presets["quality"].len(), 1);
        Ok(())
    }

    #[test]
    fn test_delete_name() -> anyhow::Result<()> {
        let service = service();
        service.upsert("quality", "high", "a")?;
        service.upsert("quality", "low", "b")?;

        let presets = service.delete("quality", Some("high"))?;
        assert!(!presets["quality"].contains_key("high"));
        assert!(presets["quality"].contains_key("low"));
        Ok(())
    }

    #[test]
    fn test_delete_last_name_keeps_empty_category() -> anyhow::Result<()> {
        let service = service();
        service.upsert("quality", "high", "a")?;

        let presets = service.delete("quality", Some("high"))?;
        assert!(presets.contains_key("quality"));
        assert!(presets["quality"].is_empty());
        Ok(())
    }

    #[test]
    fn test_delete_category_removes_all_names() -> anyhow::Result<()> {
        let service = service();
        service.upsert("quality", "high", "a")?;
        service.upsert("quality", "low", "b")?;
        service.upsert("style", "anime", "c")?;

        let presets = service.delete("quality", None)?;
        assert!(!presets.contains_key("quality"));
        assert!(presets.contains_key("style"));
        Ok(())
    }

    #[test]
    fn test_delete_missing_category() -> anyhow::Result<()> {
        let service = service();
        assert!(matches!(
            service.delete("missing", None),
            Err(Error::CategoryNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_delete_missing_name_in_existing_category() -> anyhow::Result<()> {
        let service = service();
        service.upsert("quality", "high", "a")?;

        let before = service.list()?;
        assert!(matches!(
            service.delete("quality", Some("missing")),
            Err(Error::PresetNotFound(_))
        ));
        assert_eq!(service.list()?, before);
        Ok(())
    }
}
