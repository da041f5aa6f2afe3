//! 图像相关的节点
use pyo3::{
    types::{PyModule, PyModuleMethods},
    Bound, PyResult, Python,
};

use crate::core::node::NodeRegister;

mod load_image_get_filename;
pub use load_image_get_filename::LoadImageGetFilename;

mod get_filename_from_image;
pub use get_filename_from_image::GetFilenameFromLoadedImage;

/// 图像模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "image")?;
    submodule.add_class::<LoadImageGetFilename>()?;
    submodule.add_class::<GetFilenameFromLoadedImage>()?;
    Ok(submodule)
}

/// Image node register
pub fn node_register(py: Python<'_>) -> PyResult<Vec<NodeRegister<'_>>> {
    let nodes: Vec<NodeRegister> = vec![
        NodeRegister(
            "LoadImageGetFilename",
            py.get_type::<LoadImageGetFilename>(),
            "Load Image (Get Filename)",
        ),
        NodeRegister(
            "GetFilenameFromLoadedImage",
            py.get_type::<GetFilenameFromLoadedImage>(),
            "Get Filename from Loaded Image",
        ),
    ];
    Ok(nodes)
}
