//! 文本相关的节点
use pyo3::{
    types::{PyModule, PyModuleMethods},
    Bound, PyResult, Python,
};

use crate::core::node::NodeRegister;

mod power_text_presets;
pub use power_text_presets::PowerTextPresets;

/// 文本模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "text")?;
    submodule.add_class::<PowerTextPresets>()?;
    Ok(submodule)
}

/// Text node register
pub fn node_register(py: Python<'_>) -> PyResult<Vec<NodeRegister<'_>>> {
    let nodes: Vec<NodeRegister> = vec![NodeRegister(
        "PowerTextPresets",
        py.get_type::<PowerTextPresets>(),
        "Power Text Presets",
    )];
    Ok(nodes)
}
