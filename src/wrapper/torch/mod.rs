//! torch 相关包装

pub mod tensor;
