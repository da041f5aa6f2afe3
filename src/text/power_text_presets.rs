//! 文本预设节点
//!
//! 文本原样透传, 预设的保存/选择由前端通过 /power/api/text/presets 接口完成

use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyDictMethods, PyType},
    Bound, Py, PyResult, Python,
};

use crate::core::{category::CATEGORY_TEXT, types::NODE_STRING, PromptServer};

/// 文本预设
#[pyclass(subclass)]
pub struct PowerTextPresets {}

impl PromptServer for PowerTextPresets {}

#[pymethods]
impl PowerTextPresets {
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
                    "text",
                    (NODE_STRING, {
                        let text = PyDict::new(py);
                        text.set_item("default", "")?;
                        text.set_item("multiline", true)?;
                        text
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
        ("text",)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    const CATEGORY: &'static str = CATEGORY_TEXT;

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "A multiline text box with front-end managed presets."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    const FUNCTION: &'static str = "execute";

    #[pyo3(name = "execute")]
    fn execute(&mut self, text: String) -> PyResult<(String,)> {
        Ok((text,))
    }
}
