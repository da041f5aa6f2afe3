//! 字符串提取文件名

use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyDictMethods, PyType},
    Bound, Py, PyResult, Python,
};

use crate::{
    core::{category::CATEGORY_UTILS, types::NODE_STRING, PromptServer},
    utils::filename::filename_no_ext,
};

/// 从路径或文件名字符串中提取去扩展名的文件名
#[pyclass(subclass)]
pub struct StringGetFilenameNoExt {}

impl PromptServer for StringGetFilenameNoExt {}

#[pymethods]
impl StringGetFilenameNoExt {
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
    fn return_types() -> (&'static str,) {
        (NODE_STRING,)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names() -> (&'static str,) {
        ("filename_no_ext",)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    const CATEGORY: &'static str = CATEGORY_UTILS;

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "Take a filename or path string and output the filename without its extension."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    const FUNCTION: &'static str = "execute";

    #[pyo3(name = "execute")]
    fn execute(&mut self, filename_or_path: &str) -> PyResult<(String,)> {
        Ok((filename_no_ext(filename_or_path).to_string(),))
    }
}
