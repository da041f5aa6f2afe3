//! 实用工具节点
use pyo3::{
    types::{PyModule, PyModuleMethods},
    Bound, PyResult, Python,
};

use crate::core::node::NodeRegister;

pub mod filename;

mod string_get_filename;
pub use string_get_filename::StringGetFilenameNoExt;

/// 实用工具模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "utils")?;
    submodule.add_class::<StringGetFilenameNoExt>()?;
    Ok(submodule)
}

/// Utils node register
pub fn node_register(py: Python<'_>) -> PyResult<Vec<NodeRegister<'_>>> {
    let nodes: Vec<NodeRegister> = vec![NodeRegister(
        "StringGetFilenameNoExt",
        py.get_type::<StringGetFilenameNoExt>(),
        "Get Filename (No Ext)",
    )];
    Ok(nodes)
}
