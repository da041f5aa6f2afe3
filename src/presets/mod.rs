//! 预设持久化
//!
//! 两类文件存储: LoRA 预设(列表形)与文本预设(两级映射),
//! 统一走 StoreBackend + 服务 + HTTP 接口三层

pub mod api;
pub mod lora;
pub mod routes;
pub mod store;
pub mod text;
