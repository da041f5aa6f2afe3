//! 从已加载图像获取文件名

use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyDictMethods, PyType},
    Bound, Py, PyAny, PyResult, Python,
};

use crate::{
    core::{
        category::CATEGORY_IMAGE,
        types::{NODE_IMAGE, NODE_STRING},
        PromptServer,
    },
    utils::filename::filename_no_ext,
};

/// 图像原样透传, 同时输出去扩展名的文件名
#[pyclass(subclass)]
pub struct GetFilenameFromLoadedImage {}

impl PromptServer for GetFilenameFromLoadedImage {}

#[pymethods]
impl GetFilenameFromLoadedImage {
    #[new]
    fn new() -> Self {
        Self {}
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(_cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("required", {
                let required = PyDict::new(py);
                required.set_item("image", (NODE_IMAGE,))?;
                required.set_item(
                    "filename_or_path",
                    (NODE_STRING, {
                        let filename = PyDict::new(py);
                        filename.set_item("default", "ComfyUI_00001_.png")?;
                        filename
                    }),
                )?;
                required
            })?;
            Ok(dict.into())
        })
    }

    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types() -> (&'static str, &'static str) {
        (NODE_IMAGE, NODE_STRING)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names() -> (&'static str, &'static str) {
        ("image", "filename_no_ext")
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    const CATEGORY: &'static str = CATEGORY_IMAGE;

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "Pass an image through and output the filename without its extension."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    const FUNCTION: &'static str = "execute";

    #[pyo3(name = "execute")]
    fn execute<'py>(
        &mut self,
        image: Bound<'py, PyAny>,
        filename_or_path: &str,
    ) -> PyResult<(Bound<'py, PyAny>, String)> {
        Ok((image, filename_no_ext(filename_or_path).to_string()))
    }
}
