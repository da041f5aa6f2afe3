pub mod core;
pub mod error;
pub mod wrapper;

pub mod image;
pub mod presets;
pub mod text;
pub mod utils;

use log::error;
use pyo3::{
    pymodule,
    types::{PyDict, PyDictMethods, PyModule, PyModuleMethods},
    Bound, PyResult, Python,
};

use crate::core::node::NodeRegister;

/// A Python module implemented in Rust.
#[pymodule]
#[pyo3(name = "comfyui_power_presets")] // 需要与包名保持一致
fn py_init(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // 初始化日志
    // 每个扩展模块都有自己的全局变量, 因此所使用的记录器也与其他 Rust 原生扩展无关
    let _ = tracing_subscriber::fmt()
        .with_ansi(true)
        .with_max_level(tracing::Level::DEBUG)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .try_init();

    // 添加子模块
    m.add_submodule(&text::submodule(py)?)?;
    m.add_submodule(&utils::submodule(py)?)?;
    m.add_submodule(&image::submodule(py)?)?;

    // 注册 ComfyUI NODE_CLASS_MAPPINGS/NODE_DISPLAY_NAME_MAPPINGS
    let node_mapping = PyDict::new(py);
    let name_mapping = PyDict::new(py);

    let nodes = node_register(py)?;
    for node in nodes {
        node_mapping.set_item(node.0, node.1)?;
        name_mapping.set_item(node.0, node.2)?;
    }

    const WEB_DIRECTORY: &str = "./web";

    m.add("NODE_CLASS_MAPPINGS", node_mapping)?;
    m.add("NODE_DISPLAY_NAME_MAPPINGS", name_mapping)?;
    m.add("WEB_DIRECTORY", WEB_DIRECTORY)?;

    // 注册预设路由, 失败时只记录日志, 不阻止节点加载
    if let Err(e) = presets::routes::register_routes(py) {
        error!("register preset routes failed, {e}");
    }

    Ok(())
}

/// 节点注册
fn node_register(py: Python<'_>) -> PyResult<Vec<NodeRegister<'_>>> {
    let mut nodes: Vec<NodeRegister> = Vec::new();
    nodes.extend(utils::node_register(py)?);
    nodes.extend(text::node_register(py)?);
    nodes.extend(image::node_register(py)?);
    Ok(nodes)
}
