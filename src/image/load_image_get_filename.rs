//! 加载图像并提取文件名

use std::path::Path;

use candle_core::{Device, Tensor};
use log::error;
use pyo3::{
    exceptions::PyRuntimeError,
    pyclass, pymethods,
    types::{PyDict, PyDictMethods, PyType},
    Bound, Py, PyAny, PyErr, PyResult, Python,
};

use crate::{
    core::{
        category::CATEGORY_IMAGE,
        types::{NODE_IMAGE, NODE_MASK, NODE_STRING},
        PromptServer,
    },
    error::Error,
    utils::filename::strip_extension,
    wrapper::{comfy::folder_paths::FOLDER_PATHS, torch::tensor::TensorWrapper},
};

/// 加载输入目录的图像, 输出图像/alpha遮罩/去扩展名的文件名
#[pyclass(subclass)]
pub struct LoadImageGetFilename {
    device: Device,
}

impl PromptServer for LoadImageGetFilename {}

#[pymethods]
impl LoadImageGetFilename {
    #[new]
    fn new() -> Self {
        Self {
            device: Device::Cpu,
        }
    }

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(_cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        Python::with_gil(|py| {
            // 输入目录的文件列表作为下拉选项
            let files = match FOLDER_PATHS.input_files() {
                Ok(files) => files,
                Err(e) => {
                    error!("list input directory failed, {e}");
                    Vec::new()
                }
            };

            let dict = PyDict::new(py);
            dict.set_item("required", {
                let required = PyDict::new(py);
                required.set_item("image", (files,))?;
                required
            })?;
            Ok(dict.into())
        })
    }

    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types() -> (&'static str, &'static str, &'static str) {
        (NODE_IMAGE, NODE_MASK, NODE_STRING)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names() -> (&'static str, &'static str, &'static str) {
        ("image", "mask", "filename_no_ext")
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    const CATEGORY: &'static str = CATEGORY_IMAGE;

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "Load an image and output the image, mask, and the filename without its extension."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    const FUNCTION: &'static str = "execute";

    #[pyo3(name = "execute")]
    fn execute<'py>(
        &mut self,
        py: Python<'py>,
        image: &str,
    ) -> PyResult<(Bound<'py, PyAny>, Bound<'py, PyAny>, String)> {
        let results = self.load_image(py, image);

        match results {
            Ok(v) => Ok(v),
            Err(e) => {
                error!("LoadImageGetFilename error, {e}");
                if let Err(e) =
                    self.send_error(py, "LoadImageGetFilename".to_string(), e.to_string())
                {
                    error!("send error failed, {e}");
                    return Err(PyErr::new::<PyRuntimeError, _>(e.to_string()));
                };
                Err(PyErr::new::<PyRuntimeError, _>(e.to_string()))
            }
        }
    }
}

impl LoadImageGetFilename {
    /// 读取图像并拆分为 IMAGE/MASK/文件名
    fn load_image<'py>(
        &self,
        py: Python<'py>,
        image: &str,
    ) -> Result<(Bound<'py, PyAny>, Bound<'py, PyAny>, String), Error> {
        let image_path = FOLDER_PATHS.get_annotated_filepath(image);

        let img = image::open(&image_path)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        // RGBA -> 归一化 f32, RGB 与 alpha 分离
        let mut rgb_data: Vec<f32> = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha_data: Vec<f32> = Vec::with_capacity((width * height) as usize);
        for pixel in rgba.pixels() {
            rgb_data.push(pixel[0] as f32 / 255.0);
            rgb_data.push(pixel[1] as f32 / 255.0);
            rgb_data.push(pixel[2] as f32 / 255.0);
            alpha_data.push(pixel[3] as f32 / 255.0);
        }

        // HWC -> NHWC
        let image_tensor = Tensor::from_vec(
            rgb_data,
            (height as usize, width as usize, 3),
            &self.device,
        )?
        .unsqueeze(0)?;

        // [H, W] -> [1, H, W]
        let mask_tensor =
            Tensor::from_vec(alpha_data, (height as usize, width as usize), &self.device)?
                .unsqueeze(0)?;

        let image_out = TensorWrapper::<f32>::from_tensor(image_tensor).to_py_tensor(py)?;
        let mask_out = TensorWrapper::<f32>::from_tensor(mask_tensor).to_py_tensor(py)?;

        let filename_no_ext = Self::filename_no_ext(&image_path);

        Ok((image_out, mask_out, filename_no_ext))
    }

    /// 解析后路径的文件名, 去扩展名
    fn filename_no_ext(image_path: &Path) -> String {
        let filename_only = image_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        strip_extension(&filename_only).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_no_ext() {
        assert_eq!(
            LoadImageGetFilename::filename_no_ext(Path::new("/comfy/input/my_image.png")),
            "my_image"
        );
        assert_eq!(
            LoadImageGetFilename::filename_no_ext(Path::new("archive.tar.gz")),
            "archive.tar"
        );
    }
}
