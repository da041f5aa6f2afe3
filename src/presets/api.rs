//! 预设 HTTP 接口
//!
//! 与 web 框架解耦的纯处理函数, 输入为请求体文本/查询参数,
//! 输出为 (状态码, JSON 响应体)

use log::error;
use serde_json::{json, Value};

use crate::{
    error::Error,
    presets::{
        lora::{LoraPreset, LoraPresetService, LoraPresets},
        store::StoreBackend,
        text::{TextPresetService, TextPresets},
    },
};

/// HTTP 响应
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({"error": message}),
        }
    }

    /// 响应体 JSON 文本
    pub fn body_text(&self) -> String {
        serde_json::to_string(&self.body).unwrap_or_else(|_| "{}".to_string())
    }
}

/// 请求体解析
///
/// 请求体为 JSON 文本, form 提交时由路由层取出 json 字段后传入,
/// 两种提交方式解析为同一记录
fn parse_body(body: Option<&str>) -> Option<Value> {
    serde_json::from_str(body?).ok()
}

/// 取字符串字段, 空字符串视为缺失
fn non_empty_str<'a>(data: &'a Value, field: &str) -> Option<&'a str> {
    data.get(field)?.as_str().filter(|s| !s.is_empty())
}

/// 预设接口, LoRA 列表存储与文本两级映射存储共用一套出入参约定
pub struct PresetApi<LB, TB> {
    lora: LoraPresetService<LB>,
    text: TextPresetService<TB>,
}

impl<LB, TB> PresetApi<LB, TB>
where
    LB: StoreBackend<LoraPresets>,
    TB: StoreBackend<TextPresets>,
{
    pub fn new(lora: LoraPresetService<LB>, text: TextPresetService<TB>) -> Self {
        Self { lora, text }
    }

    /// GET /rgthree/api/lora/presets
    pub fn lora_list(&self) -> ApiResponse {
        match self.lora.list() {
            Ok(presets) => ApiResponse::ok(json!(presets)),
            Err(e) => {
                error!("Error reading presets, {e}");
                ApiResponse::error(500, "Failed to read presets")
            }
        }
    }

    /// POST /rgthree/api/lora/presets
    pub fn lora_save(&self, body: Option<&str>) -> ApiResponse {
        let Some(data) = parse_body(body) else {
            return ApiResponse::error(400, "Invalid data");
        };

        if data.get("name").is_none() || data.get("loras").is_none() {
            return ApiResponse::error(400, "Missing name or loras field");
        }

        let preset: LoraPreset = match serde_json::from_value(data) {
            Ok(preset) => preset,
            Err(_) => return ApiResponse::error(400, "Invalid data"),
        };

        match self.lora.upsert(preset) {
            Ok(presets) => ApiResponse::ok(json!({"status": "ok", "presets": presets})),
            Err(e) => {
                error!("Error writing presets file, {e}");
                ApiResponse::error(500, "Failed to save preset")
            }
        }
    }

    /// DELETE /rgthree/api/lora/presets
    ///
    /// name 取自请求体, 请求体缺失时回退到查询参数
    pub fn lora_delete(&self, body: Option<&str>, query_name: Option<&str>) -> ApiResponse {
        let data = parse_body(body);
        let name = data
            .as_ref()
            .and_then(|data| non_empty_str(data, "name"))
            .or(query_name.filter(|s| !s.is_empty()));

        let Some(name) = name else {
            return ApiResponse::error(400, "Missing name");
        };

        match self.lora.delete(name) {
            Ok(presets) => ApiResponse::ok(json!({"status": "ok", "presets": presets})),
            Err(Error::PresetNotFound(_)) => ApiResponse::error(404, "Preset not found"),
            Err(e) => {
                error!("Error writing presets file, {e}");
                ApiResponse::error(500, "Failed to save preset")
            }
        }
    }

    /// GET /power/api/text/presets
    pub fn text_list(&self) -> ApiResponse {
        match self.text.list() {
            Ok(presets) => ApiResponse::ok(json!(presets)),
            Err(e) => {
                error!("Error reading text presets, {e}");
                ApiResponse::error(500, "Failed to read presets")
            }
        }
    }

    /// POST /power/api/text/presets
    pub fn text_save(&self, body: Option<&str>) -> ApiResponse {
        let Some(data) = parse_body(body) else {
            return ApiResponse::error(400, "Invalid data");
        };

        let category = non_empty_str(&data, "category");
        let name = non_empty_str(&data, "name");
        let (Some(category), Some(name)) = (category, name) else {
            return ApiResponse::error(400, "Missing category or name");
        };
        // text 可缺省, 缺省时存空串
        let text = data.get("text").and_then(Value::as_str).unwrap_or_default();

        match self.text.upsert(category, name, text) {
            Ok(presets) => ApiResponse::ok(json!({"status": "ok", "presets": presets})),
            Err(e) => {
                error!("Error writing text presets file, {e}");
                ApiResponse::error(500, "Failed to save preset")
            }
        }
    }

    /// DELETE /power/api/text/presets
    ///
    /// name 缺省时删除整个分类
    pub fn text_delete(&self, body: Option<&str>) -> ApiResponse {
        let data = parse_body(body);
        let Some(category) = data
            .as_ref()
            .and_then(|data| non_empty_str(data, "category"))
        else {
            return ApiResponse::error(400, "Missing category");
        };
        let name = data.as_ref().and_then(|data| non_empty_str(data, "name"));

        match self.text.delete(category, name) {
            Ok(presets) => ApiResponse::ok(json!({"status": "ok", "presets": presets})),
            Err(Error::CategoryNotFound(_)) => ApiResponse::error(404, "Category not found"),
            Err(Error::PresetNotFound(_)) => ApiResponse::error(404, "Preset not found"),
            Err(e) => {
                error!("Error writing text presets file, {e}");
                ApiResponse::error(500, "Failed to save preset")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::presets::store::MemoryStore;

    fn api() -> PresetApi<MemoryStore<LoraPresets>, MemoryStore<TextPresets>> {
        PresetApi::new(
            LoraPresetService::new(MemoryStore::default()),
            TextPresetService::new(MemoryStore::default()),
        )
    }

    #[test]
    fn test_lora_list_empty() {
        let response = api().lora_list();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!([]));
    }

    #[test]
    fn test_lora_save_then_list() {
        let api = api();
        let body = json!({"name": "a", "loras": [{"lora": "x"}]}).to_string();

        let response = api.lora_save(Some(&body));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["status"], "ok");
        assert_eq!(response.body["presets"][0]["name"], "a");

        let response = api.lora_list();
        assert_eq!(response.body, json!([{"name": "a", "loras": [{"lora": "x"}]}]));
    }

    #[test]
    fn test_lora_save_invalid_body() {
        let response = api().lora_save(Some("not json"));
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({"error": "Invalid data"}));

        let response = api().lora_save(None);
        assert_eq!(response.status, 400);
    }

    #[test]
    fn test_lora_save_missing_fields() {
        let response = api().lora_save(Some(&json!({"name": "a"}).to_string()));
        assert_eq!(response.status, 400);
        assert_eq!(
            response.body,
            json!({"error": "Missing name or loras field"})
        );
    }

    #[test]
    fn test_lora_delete_from_body_and_query() {
        let api = api();
        api.lora_save(Some(&json!({"name": "a", "loras": []}).to_string()));
        api.lora_save(Some(&json!({"name": "b", "loras": []}).to_string()));

        let response = api.lora_delete(Some(&json!({"name": "a"}).to_string()), None);
        assert_eq!(response.status, 200);

        let response = api.lora_delete(None, Some("b"));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["presets"], json!([]));
    }

    #[test]
    fn test_lora_delete_missing_name() {
        let response = api().lora_delete(None, None);
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({"error": "Missing name"}));
    }

    #[test]
    fn test_lora_delete_not_found() {
        let response = api().lora_delete(None, Some("missing"));
        assert_eq!(response.status, 404);
        assert_eq!(response.body, json!({"error": "Preset not found"}));
    }

    #[test]
    fn test_lora_save_write_failure() {
        let lora_backend: MemoryStore<LoraPresets> = MemoryStore::default();
        lora_backend.set_fail_saves(true).expect("set_fail_saves");
        let api = PresetApi::new(
            LoraPresetService::new(lora_backend),
            TextPresetService::new(MemoryStore::<TextPresets>::default()),
        );

        let response = api.lora_save(Some(&json!({"name": "a", "loras": []}).to_string()));
        assert_eq!(response.status, 500);
        assert_eq!(response.body, json!({"error": "Failed to save preset"}));
    }

    #[test]
    fn test_text_save_then_list() {
        let api = api();
        let body = json!({"category": "quality", "name": "high", "text": "best"}).to_string();

        let response = api.text_save(Some(&body));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["presets"]["quality"]["high"], "best");

        let response = api.text_list();
        assert_eq!(response.body, json!({"quality": {"high": "best"}}));
    }

    #[test]
    fn test_text_save_missing_fields() {
        let response = api().text_save(Some(&json!({"category": "quality"}).to_string()));
        assert_eq!(response.status, 400);
        assert_eq!(
            response.body,
            json!({"error": "Missing category or name"})
        );

        // 空字符串与缺失同样处理
        let body = json!({"category": "", "name": "high"}).to_string();
        assert_eq!(api().text_save(Some(&body)).status, 400);
    }

    #[test]
    fn test_text_save_without_text_defaults_empty() {
        let api = api();
        let body = json!({"category": "quality", "name": "high"}).to_string();

        let response = api.text_save(Some(&body));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["presets"]["quality"]["high"], "");
    }

    #[test]
    fn test_text_delete_name_and_category() {
        let api = api();
        api.text_save(Some(
            &json!({"category": "quality", "name": "high", "text": "a"}).to_string(),
        ));
        api.text_save(Some(
            &json!({"category": "quality", "name": "low", "text": "b"}).to_string(),
        ));

        let response = api.text_delete(Some(
            &json!({"category": "quality", "name": "high"}).to_string(),
        ));
        assert_eq!(response.status, 200);

        let response = api.text_delete(Some(&json!({"category": "quality"}).to_string()));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["presets"], json!({}));
    }

    #[test]
    fn test_text_delete_errors() {
        let api = api();
        let response = api.text_delete(None);
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({"error": "Missing category"}));

        let response = api.text_delete(Some(&json!({"category": "missing"}).to_string()));
        assert_eq!(response.status, 404);
        assert_eq!(response.body, json!({"error": "Category not found"}));

        api.text_save(Some(
            &json!({"category": "quality", "name": "high"}).to_string(),
        ));
        let response = api.text_delete(Some(
            &json!({"category": "quality", "name": "missing"}).to_string(),
        ));
        assert_eq!(response.status, 404);
        assert_eq!(response.body, json!({"error": "Preset not found"}));
    }

    #[test]
    fn test_form_submitted_json_parses_same() {
        // form 提交时路由层取出 json 字段原文, 与 application/json 等价
        let api = api();
        let form_json = r#"{"name": "a", "loras": []}"#;
        let response = api.lora_save(Some(form_json));
        assert_eq!(response.status, 200);
    }

    #[test]
    fn test_body_text() {
        let response = ApiResponse::ok(json!({"status": "ok"}));
        assert_eq!(response.body_text(), r#"{"status":"ok"}"#);
    }
}
