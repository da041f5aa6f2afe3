//! LoRA 预设存储
//!
//! 列表形存储, name 为唯一键, loras 内容不做解释

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::Error, presets::store::StoreBackend};

/// 单条 LoRA 预设
///
/// loras 为前端提交的不透明配置列表, 其余字段原样保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoraPreset {
    pub name: String,
    pub loras: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type LoraPresets = Vec<LoraPreset>;

/// LoRA 预设服务
pub struct LoraPresetService<B> {
    backend: B,
}

impl<B> LoraPresetService<B>
where
    B: StoreBackend<LoraPresets>,
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn list(&self) -> Result<LoraPresets, Error> {
        self.backend.load()
    }

    /// 按 name 更新或追加, 已存在时原位置替换
    pub fn upsert(&self, preset: LoraPreset) -> Result<LoraPresets, Error> {
        let mut presets = self.backend.load()?;

        if let Some(existing) = presets.iter_mut().find(|p| p.name == preset.name) {
            *existing = preset;
        } else {
            presets.push(preset);
        }

        self.backend.save(&presets)?;
        Ok(presets)
    }

    /// 删除所有同名预设, 无匹配时报错
    pub fn delete(&self, name: &str) -> Result<LoraPresets, Error> {
        let mut presets = self.backend.load()?;

        let initial_len = presets.len();
        presets.retain(|p| p.name != name);
        if presets.len() == initial_len {
            return Err(Error::PresetNotFound(name.to_string()));
        }

        self.backend.save(&presets)?;
        Ok(presets)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::presets::store::MemoryStore;

    fn preset(name: &str, lora: &str) -> LoraPreset {
        LoraPreset {
            name: name.to_string(),
            loras: vec![json!({"lora": lora, "strength": 1.0})],
            extra: Map::new(),
        }
    }

    fn service() -> LoraPresetService<MemoryStore<LoraPresets>> {
        LoraPresetService::new(MemoryStore::default())
    }

    #[test]
    fn test_upsert_then_list() -> anyhow::Result<()> {
        let service = service();
        service.upsert(preset("a", "x.safetensors"))?;
        service.upsert(preset("a", "x.safetensors"))?;

        let presets = service.list()?;
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0], preset("a", "x.safetensors"));
        Ok(())
    }

    #[test]
    fn test_upsert_replaces_in_place() -> anyhow::Result<()> {
        let service = service();
        service.upsert(preset("a", "x.safetensors"))?;
        service.upsert(preset("b", "y.safetensors"))?;
        service.upsert(preset("a", "z.safetensors"))?;

        let presets = service.list()?;
        assert_eq!(presets.len(), 2);
        // 替换保留原有位置
        assert_eq!(presets[0], preset("a", "z.safetensors"));
        assert_eq!(presets[1], preset("b", "y.safetensors"));
        Ok(())
    }

    #[test]
    fn test_delete() -> anyhow::Result<()> {
        let service = service();
        service.upsert(preset("a", "x.safetensors"))?;
        service.upsert(preset("b", "y.safetensors"))?;

        let presets = service.delete("a")?;
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "b");
        Ok(())
    }

    #[test]
    fn test_delete_missing_leaves_store_unchanged() -> anyhow::Result<()> {
        let service = service();
        service.upsert(preset("a", "x.safetensors"))?;

        let before = service.list()?;
        assert!(matches!(
            service.delete("missing"),
            Err(Error::PresetNotFound(_))
        ));
        assert_eq!(service.list()?, before);
        Ok(())
    }

    #[test]
    fn test_extra_fields_round_trip() -> anyhow::Result<()> {
        let raw = json!({"name": "a", "loras": [], "color": "#fff"});
        let preset: LoraPreset = serde_json::from_value(raw.clone())?;
        assert_eq!(serde_json::to_value(&preset)?, raw);
        Ok(())
    }
}
