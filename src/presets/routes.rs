//! 预设路由注册
//!
//! 通过内嵌 Python 垫片把同步的 Rust 处理函数挂到
//! PromptServer.instance.routes (aiohttp) 上

use pyo3::{
    ffi::c_str,
    pyclass, pymethods,
    types::{PyDict, PyDictMethods},
    Py, Python,
};

use crate::{
    error::Error,
    presets::{
        api::PresetApi,
        lora::{LoraPresets, LoraPresetService},
        store::{CorruptPolicy, JsonFileStore},
        text::{TextPresetService, TextPresets},
    },
    wrapper::comfy::folder_paths::FOLDER_PATHS,
};

/// LoRA 预设文件名
pub const LORA_PRESETS_FILE: &str = "lora_presets.json";
/// 文本预设文件名
pub const TEXT_PRESETS_FILE: &str = "power_text_presets.json";

/// 文件存储后端的预设接口, 暴露给 Python 垫片
#[pyclass]
pub struct PresetRoutes {
    api: PresetApi<JsonFileStore<LoraPresets>, JsonFileStore<TextPresets>>,
}

impl Default for PresetRoutes {
    fn default() -> Self {
        let corrupt_policy = CorruptPolicy::from_env();
        let lora_store = JsonFileStore::new(FOLDER_PATHS.user_file(LORA_PRESETS_FILE))
            .with_corrupt_policy(corrupt_policy);
        let text_store = JsonFileStore::new(FOLDER_PATHS.user_file(TEXT_PRESETS_FILE))
            .with_corrupt_policy(corrupt_policy);

        Self {
            api: PresetApi::new(
                LoraPresetService::new(lora_store),
                TextPresetService::new(text_store),
            ),
        }
    }
}

#[pymethods]
impl PresetRoutes {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn lora_list(&self) -> (u16, String) {
        let response = self.api.lora_list();
        (response.status, response.body_text())
    }

    #[pyo3(signature = (body))]
    fn lora_save(&self, body: Option<String>) -> (u16, String) {
        let response = self.api.lora_save(body.as_deref());
        (response.status, response.body_text())
    }

    #[pyo3(signature = (body, query_name))]
    fn lora_delete(&self, body: Option<String>, query_name: Option<String>) -> (u16, String) {
        let response = self.api.lora_delete(body.as_deref(), query_name.as_deref());
        (response.status, response.body_text())
    }

    fn text_list(&self) -> (u16, String) {
        let response = self.api.text_list();
        (response.status, response.body_text())
    }

    #[pyo3(signature = (body))]
    fn text_save(&self, body: Option<String>) -> (u16, String) {
        let response = self.api.text_save(body.as_deref());
        (response.status, response.body_text())
    }

    #[pyo3(signature = (body))]
    fn text_delete(&self, body: Option<String>) -> (u16, String) {
        let response = self.api.text_delete(body.as_deref());
        (response.status, response.body_text())
    }
}

/// 注册预设路由
///
/// 请求体的读取在 Python 侧完成: application/json 取原文,
/// form 提交取 json 字段, 之后全部交给 Rust 处理
pub fn register_routes(py: Python<'_>) -> Result<(), Error> {
    let api = Py::new(py, PresetRoutes::default())?;

    let globals = PyDict::new(py);
    globals.set_item("api", api)?;

    let code = c_str!(
        r#"
from aiohttp import web
from server import PromptServer

routes = PromptServer.instance.routes


async def _request_body(request):
    if request.content_type == 'application/json':
        try:
            return await request.text()
        except Exception:
            return None
    try:
        post = await request.post()
        return post.get('json')
    except Exception:
        return None


@routes.get('/rgthree/api/lora/presets')
async def get_lora_presets(request):
    status, body = api.lora_list()
    return web.json_response(text=body, status=status)


@routes.post('/rgthree/api/lora/presets')
async def save_lora_preset(request):
    status, body = api.lora_save(await _request_body(request))
    return web.json_response(text=body, status=status)


@routes.delete('/rgthree/api/lora/presets')
async def delete_lora_preset(request):
    body = None
    if request.can_read_body:
        try:
            body = await request.text()
        except Exception:
            body = None
    status, resp = api.lora_delete(body, request.query.get('name'))
    return web.json_response(text=resp, status=status)


@routes.get('/power/api/text/presets')
async def get_text_presets(request):
    status, body = api.text_list()
    return web.json_response(text=body, status=status)


@routes.post('/power/api/text/presets')
async def save_text_preset(request):
    status, body = api.text_save(await _request_body(request))
    return web.json_response(text=body, status=status)


@routes.delete('/power/api/text/presets')
async def delete_text_preset(request):
    body = None
    if request.can_read_body:
        try:
            body = await request.text()
        except Exception:
            body = None
    status, resp = api.text_delete(body)
    return web.json_response(text=resp, status=status)
"#
    );

    py.run(code, Some(&globals), None)?;
    Ok(())
}
